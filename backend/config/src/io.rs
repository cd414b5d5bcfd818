//! Config file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::PinForgeConfig;

/// Env var naming the config file.
pub const CONFIG_PATH_VAR: &str = "PINFORGE_CONFIG";

/// Default config file name, looked up in the working directory.
const CONFIG_FILE_NAME: &str = "pinforge.yaml";

/// Resolve the config path: explicit > `PINFORGE_CONFIG` > `./pinforge.yaml`.
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Read the raw YAML document as a JSON value tree.
///
/// A missing file yields an empty object so defaults apply.
pub async fn load_raw(path: &Path) -> Result<serde_json::Value> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let value: serde_json::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(match value {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    })
}

/// Load and parse the config from disk without env processing.
pub async fn load_config(path: &Path) -> Result<PinForgeConfig> {
    let value = load_raw(path).await?;
    serde_json::from_value(value).with_context(|| format!("Invalid config at: {}", path.display()))
}
