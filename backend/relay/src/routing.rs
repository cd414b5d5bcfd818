//! Archive channel routing.

use std::collections::HashSet;

pub const DEFAULT_ARCHIVE_CHANNEL: &str = "pins";
pub const DEFAULT_SECRET_ARCHIVE_CHANNEL: &str = "secret-pins";

/// Chooses the archive channel name for a source channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRouting {
    pub default_channel: String,
    pub secret_channel: String,
    /// Source channel names whose pins go to the secret archive.
    pub secret_sources: HashSet<String>,
}

impl ArchiveRouting {
    pub fn new(
        default_channel: impl Into<String>,
        secret_channel: impl Into<String>,
        secret_sources: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            default_channel: default_channel.into(),
            secret_channel: secret_channel.into(),
            secret_sources: secret_sources.into_iter().collect(),
        }
    }

    pub fn is_secret(&self, source_channel: &str) -> bool {
        self.secret_sources.contains(source_channel)
    }

    pub fn archive_for(&self, source_channel: &str) -> &str {
        if self.is_secret(source_channel) {
            &self.secret_channel
        } else {
            &self.default_channel
        }
    }
}

impl Default for ArchiveRouting {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_CHANNEL, DEFAULT_SECRET_ARCHIVE_CHANNEL, Vec::new())
    }
}
