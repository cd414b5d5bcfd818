use std::path::PathBuf;
use std::time::Duration;

use pinforge_config::defaults::{
    DEFAULT_ARCHIVE_CHANNEL, DEFAULT_FOOTER, DEFAULT_LOG_LEVEL, DEFAULT_PREFIX, DEFAULT_SECRET_ARCHIVE_CHANNEL,
    DEFAULT_TRANSIENT_SECS, DEFAULT_WEBHOOK_NAME,
};
use pinforge_config::PinForgeConfig;
use pinforge_logging::LoggingSettings;
use pinforge_relay::{ArchiveRouting, RelaySettings};

/// Relay behaviour from a prepared config.
pub fn relay_settings(config: &PinForgeConfig) -> RelaySettings {
    let archive = &config.archive;
    let routing = ArchiveRouting::new(
        archive.default_channel.as_deref().unwrap_or(DEFAULT_ARCHIVE_CHANNEL),
        archive.secret_channel.as_deref().unwrap_or(DEFAULT_SECRET_ARCHIVE_CHANNEL),
        archive.secret_sources.iter().cloned(),
    );

    // An empty footer disables it.
    let footer = match config.notices.footer.as_deref() {
        Some("") => None,
        Some(footer) => Some(footer.to_string()),
        None => Some(DEFAULT_FOOTER.to_string()),
    };

    RelaySettings {
        prefix: config.commands.prefix.clone().unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        webhook_name: archive
            .webhook_name
            .clone()
            .unwrap_or_else(|| DEFAULT_WEBHOOK_NAME.to_string()),
        footer,
        transient_ttl: Duration::from_secs(config.notices.transient_secs.unwrap_or(DEFAULT_TRANSIENT_SECS)),
        routing,
    }
}

pub fn logging_settings(config: &PinForgeConfig) -> LoggingSettings {
    LoggingSettings {
        level: config
            .logging
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        dir: config.logging.dir.as_ref().map(PathBuf::from),
        json: config.logging.json.unwrap_or(false),
    }
}
