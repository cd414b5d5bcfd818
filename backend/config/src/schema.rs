//! pinforge configuration schema.
//!
//! Every field is optional in the file; [`crate::defaults`] fills the gaps.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinForgeConfig {
    #[serde(default)]
    pub discord: DiscordConfig,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub notices: NoticesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConfig {
    /// Bot token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandsConfig {
    /// Case-sensitive command prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_channel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_channel: Option<String>,

    /// Source channels whose pins go to the secret archive
    #[serde(default)]
    pub secret_sources: Vec<String>,

    /// Name of the webhook used to repost as the original author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticesConfig {
    /// Seconds before an error notice removes itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for daily-rotated JSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Console output as JSON lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
discord:
  token: abc
archive:
  defaultChannel: pins
  secretChannel: secret-pins
  secretSources: [mods, staff]
notices:
  transientSecs: 8
"#;
        let cfg: PinForgeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.discord.token.as_deref(), Some("abc"));
        assert_eq!(cfg.archive.secret_sources, vec!["mods", "staff"]);
        assert_eq!(cfg.notices.transient_secs, Some(8));
        assert!(cfg.commands.prefix.is_none());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg: PinForgeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, PinForgeConfig::default());
    }
}
