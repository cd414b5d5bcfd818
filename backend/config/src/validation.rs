//! Config validation with user-friendly messages.

use crate::schema::PinForgeConfig;
use thiserror::Error;

/// Discord rejects channel names longer than this.
const MAX_CHANNEL_NAME_LEN: usize = 100;
/// Discord rejects webhook names longer than this.
const MAX_WEBHOOK_NAME_LEN: usize = 80;
const MAX_TRANSIENT_SECS: u64 = 60;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through `tracing`.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
///
/// Expects defaults to have been applied.
pub fn validate(config: &PinForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_discord(config, &mut report);
    validate_commands(config, &mut report);
    validate_archive(config, &mut report);
    validate_notices(config, &mut report);
    report
}

fn validate_discord(config: &PinForgeConfig, report: &mut ValidationReport) {
    match config.discord.token.as_deref().map(str::trim) {
        None | Some("") => report.error("discord.token", "Bot token is missing; set BOT_TOKEN"),
        Some(token) if token.contains(char::is_whitespace) => {
            report.error("discord.token", "Bot token must not contain whitespace")
        }
        Some(_) => {}
    }
}

fn validate_commands(config: &PinForgeConfig, report: &mut ValidationReport) {
    let prefix = config.commands.prefix.as_deref().unwrap_or_default();
    if prefix.is_empty() {
        report.error("commands.prefix", "Command prefix cannot be empty");
    } else if prefix.contains(char::is_whitespace) {
        report.error("commands.prefix", "Command prefix cannot contain whitespace");
    }
}

/// Text channel names: lowercase, no whitespace, 1..=100 chars.
fn is_valid_channel_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_CHANNEL_NAME_LEN
        && !name.contains(char::is_whitespace)
        && !name.chars().any(char::is_uppercase)
}

fn validate_archive(config: &PinForgeConfig, report: &mut ValidationReport) {
    let archive = &config.archive;
    let default = archive.default_channel.as_deref().unwrap_or_default();
    let secret = archive.secret_channel.as_deref().unwrap_or_default();

    for (path, name) in [("archive.defaultChannel", default), ("archive.secretChannel", secret)] {
        if !is_valid_channel_name(name) {
            report.error(
                path,
                format!("'{name}' is not a valid text channel name (lowercase, no spaces, 1-100 chars)"),
            );
        }
    }

    if default == secret {
        report.warn(
            "archive.secretChannel",
            "Secret and default archive share a channel; secret pins will be public",
        );
    }

    for (i, source) in archive.secret_sources.iter().enumerate() {
        if source.trim().is_empty() {
            report.error(format!("archive.secretSources[{i}]"), "Channel name cannot be empty");
        }
    }

    let webhook = archive.webhook_name.as_deref().unwrap_or_default();
    if webhook.trim().is_empty() {
        report.error("archive.webhookName", "Webhook name cannot be empty");
    } else if webhook.chars().count() > MAX_WEBHOOK_NAME_LEN {
        report.error("archive.webhookName", "Webhook name is longer than 80 characters");
    }
}

fn validate_notices(config: &PinForgeConfig, report: &mut ValidationReport) {
    match config.notices.transient_secs {
        Some(0) => report.warn("notices.transientSecs", "Error notices will vanish immediately"),
        Some(secs) if secs > MAX_TRANSIENT_SECS => {
            report.warn("notices.transientSecs", format!("{secs}s keeps error notices around for long"))
        }
        _ => {}
    }
}
