//! `pinforge-config`: pinforge runtime configuration.
//!
//! Provides:
//! - Typed config schema
//! - YAML loading with `${ENV_VAR}` substitution
//! - Environment overrides (`BOT_TOKEN`, `PINFORGE_*`)
//! - Default value application
//! - Validation
//! - Redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, process_env, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_file_path, load_config, load_raw};
pub use redact::redact;
pub use schema::{ArchiveConfig, CommandsConfig, DiscordConfig, LoggingConfig, NoticesConfig, PinForgeConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Load, substitute env vars, apply overrides and defaults, and validate.
///
/// Validation findings are returned alongside the config; the caller logs
/// them once a subscriber is installed and decides whether errors are fatal.
pub async fn load_and_prepare(path: &Path) -> Result<(PinForgeConfig, ValidationReport)> {
    load_and_prepare_with(path, &process_env()).await
}

/// [`load_and_prepare`] with an explicit environment (useful for testing).
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<(PinForgeConfig, ValidationReport)> {
    let raw = load_raw(path).await?;

    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: PinForgeConfig =
        serde_json::from_value(value).with_context(|| format!("Invalid config at: {}", path.display()))?;

    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn full_pipeline_from_file_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinforge.yaml");
        std::fs::write(
            &path,
            "discord:\n  token: \"${MY_TOKEN}\"\narchive:\n  secretSources: [mods]\n",
        )
        .unwrap();
        let env: HashMap<String, String> = [("MY_TOKEN".to_string(), "abc.def".to_string())].into();

        let (cfg, report) = load_and_prepare_with(&path, &env).await.unwrap();
        assert!(report.is_valid());
        assert_eq!(cfg.discord.token.as_deref(), Some("abc.def"));
        assert_eq!(cfg.archive.secret_sources, vec!["mods"]);
        assert_eq!(cfg.archive.default_channel.as_deref(), Some("pins"));
    }

    #[tokio::test]
    async fn env_token_overrides_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let env: HashMap<String, String> = [("BOT_TOKEN".to_string(), "tok".to_string())].into();
        let (cfg, report) = load_and_prepare_with(&dir.path().join("none.yaml"), &env).await.unwrap();
        assert!(report.is_valid());
        assert_eq!(cfg.discord.token.as_deref(), Some("tok"));
        assert_eq!(cfg.commands.prefix.as_deref(), Some("!"));
    }

    #[tokio::test]
    async fn no_token_anywhere_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (_, report) = load_and_prepare_with(&dir.path().join("none.yaml"), &HashMap::new())
            .await
            .unwrap();
        assert!(!report.is_valid());
    }
}
