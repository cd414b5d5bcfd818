use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform snowflake identifiers.
pub type GuildId = u64;
pub type ChannelId = u64;
pub type MessageId = u64;
pub type UserId = u64;

/// A user as seen by the relay: enough to mention them and to impersonate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    /// Nickname, global display name, or username, in that order.
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl UserRef {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A guild text channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub name: String,
}

impl ChannelInfo {
    pub fn new(id: ChannelId, guild_id: GuildId, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id,
            name: name.into(),
        }
    }

    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

/// An integration endpoint able to post under arbitrary names and avatars.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookHandle {
    pub id: u64,
    pub channel_id: ChannelId,
    pub name: String,
    /// Execution URL; embeds the webhook token.
    pub url: String,
}

impl fmt::Debug for WebhookHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookHandle")
            .field("id", &self.id)
            .field("channel_id", &self.channel_id)
            .field("name", &self.name)
            .field("url", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_use_platform_syntax() {
        assert_eq!(UserRef::new(42, "alice").mention(), "<@42>");
        assert_eq!(ChannelInfo::new(7, 1, "general").mention(), "<#7>");
    }

    #[test]
    fn webhook_debug_hides_url() {
        let hook = WebhookHandle {
            id: 9,
            channel_id: 3,
            name: "PinForwarder".into(),
            url: "https://discord.com/api/webhooks/9/secret-token".into(),
        };
        let rendered = format!("{hook:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("PinForwarder"));
    }
}
