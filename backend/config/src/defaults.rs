//! Config defaults: applies default values to parsed config.

use crate::schema::PinForgeConfig;

pub use pinforge_commands::DEFAULT_PREFIX;
pub use pinforge_relay::relay::{DEFAULT_FOOTER, DEFAULT_WEBHOOK_NAME};
pub use pinforge_relay::routing::{DEFAULT_ARCHIVE_CHANNEL, DEFAULT_SECRET_ARCHIVE_CHANNEL};

pub const DEFAULT_TRANSIENT_SECS: u64 = pinforge_relay::relay::DEFAULT_TRANSIENT_TTL.as_secs();
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PinForgeConfig) -> PinForgeConfig {
    let config = apply_command_defaults(config);
    let config = apply_archive_defaults(config);
    let config = apply_notice_defaults(config);
    apply_logging_defaults(config)
}

fn apply_command_defaults(mut config: PinForgeConfig) -> PinForgeConfig {
    config.commands.prefix.get_or_insert_with(|| DEFAULT_PREFIX.to_string());
    config
}

fn apply_archive_defaults(mut config: PinForgeConfig) -> PinForgeConfig {
    let archive = &mut config.archive;
    archive
        .default_channel
        .get_or_insert_with(|| DEFAULT_ARCHIVE_CHANNEL.to_string());
    archive
        .secret_channel
        .get_or_insert_with(|| DEFAULT_SECRET_ARCHIVE_CHANNEL.to_string());
    archive
        .webhook_name
        .get_or_insert_with(|| DEFAULT_WEBHOOK_NAME.to_string());
    config
}

fn apply_notice_defaults(mut config: PinForgeConfig) -> PinForgeConfig {
    config.notices.transient_secs.get_or_insert(DEFAULT_TRANSIENT_SECS);
    config.notices.footer.get_or_insert_with(|| DEFAULT_FOOTER.to_string());
    config
}

fn apply_logging_defaults(mut config: PinForgeConfig) -> PinForgeConfig {
    config.logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config.logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_default() {
        let cfg = apply_all_defaults(PinForgeConfig::default());
        assert_eq!(cfg.commands.prefix.as_deref(), Some("!"));
        assert_eq!(cfg.archive.default_channel.as_deref(), Some("pins"));
        assert_eq!(cfg.archive.secret_channel.as_deref(), Some("secret-pins"));
        assert_eq!(cfg.archive.webhook_name.as_deref(), Some("PinForwarder"));
        assert_eq!(cfg.notices.transient_secs, Some(5));
        assert_eq!(cfg.logging.level.as_deref(), Some("info"));
        assert!(cfg.archive.secret_sources.is_empty());
        assert!(cfg.discord.token.is_none());
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = PinForgeConfig::default();
        cfg.commands.prefix = Some("?".into());
        cfg.notices.transient_secs = Some(10);
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.commands.prefix.as_deref(), Some("?"));
        assert_eq!(cfg.notices.transient_secs, Some(10));
    }
}
