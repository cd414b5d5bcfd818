//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside YAML string values, resolved at load time
//!   (`$${VAR}` escapes to a literal `${VAR}`). Only `[A-Z_][A-Z0-9_]*` names match.
//! - Well-known variables such as `BOT_TOKEN` that override config fields.

use std::collections::HashMap;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::schema::PinForgeConfig;

/// `$${NAME}` (escaped) or `${NAME}`.
static ENV_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env ref regex"));

pub const TOKEN_VAR: &str = "BOT_TOKEN";
pub const PREFIX_VAR: &str = "PINFORGE_PREFIX";
pub const ARCHIVE_CHANNEL_VAR: &str = "PINFORGE_ARCHIVE_CHANNEL";
pub const SECRET_ARCHIVE_CHANNEL_VAR: &str = "PINFORGE_SECRET_ARCHIVE_CHANNEL";
pub const SECRET_CHANNELS_VAR: &str = "PINFORGE_SECRET_CHANNELS";
pub const LOG_LEVEL_VAR: &str = "PINFORGE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "PINFORGE_LOG_DIR";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in every string leaf of `value`.
///
/// Fails on the first referenced variable that is unset or empty.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute_value(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_REF_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(replaced.into_owned())
}

/// Apply well-known environment variables on top of the file config.
pub fn apply_env_overrides(mut config: PinForgeConfig, env: &HashMap<String, String>) -> PinForgeConfig {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string);

    if let Some(token) = get(TOKEN_VAR) {
        config.discord.token = Some(token);
    }
    if let Some(prefix) = get(PREFIX_VAR) {
        config.commands.prefix = Some(prefix);
    }
    if let Some(name) = get(ARCHIVE_CHANNEL_VAR) {
        config.archive.default_channel = Some(name);
    }
    if let Some(name) = get(SECRET_ARCHIVE_CHANNEL_VAR) {
        config.archive.secret_channel = Some(name);
    }
    if let Some(list) = get(SECRET_CHANNELS_VAR) {
        config.archive.secret_sources = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(level) = get(LOG_LEVEL_VAR) {
        config.logging.level = Some(level);
    }
    if let Some(dir) = get(LOG_DIR_VAR) {
        config.logging.dir = Some(dir);
    }
    config
}
