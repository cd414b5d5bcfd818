use std::time::Duration;

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::message::{ImpersonatedPost, MessageSnapshot, Notice};
use crate::types::{ChannelId, ChannelInfo, GuildId, MessageId, WebhookHandle};

/// The chat platform operations the pin relay depends on.
///
/// Every call suspends until the remote service answers and reports failure
/// as a [`crate::RelayError`] so callers can decide to abort or tolerate.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Human-readable platform name for logging.
    fn name(&self) -> &str;

    /// Whether the bot may manage webhooks in the guild.
    async fn can_manage_webhooks(&self, guild_id: GuildId) -> RelayResult<bool>;

    async fn channel(&self, channel_id: ChannelId) -> RelayResult<ChannelInfo>;

    /// Look up a guild text channel by exact name.
    async fn find_text_channel(&self, guild_id: GuildId, name: &str) -> RelayResult<Option<ChannelInfo>>;

    async fn create_text_channel(&self, guild_id: GuildId, name: &str, reason: &str) -> RelayResult<ChannelInfo>;

    async fn fetch_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<MessageSnapshot>;

    /// The most recently pinned message of a channel, if any.
    async fn latest_pin(&self, channel_id: ChannelId) -> RelayResult<Option<MessageSnapshot>>;

    async fn send_notice(&self, channel_id: ChannelId, notice: &Notice) -> RelayResult<MessageId>;

    /// Post a plain text message that removes itself after `ttl`.
    async fn send_transient(&self, channel_id: ChannelId, text: &str, ttl: Duration) -> RelayResult<()>;

    async fn send_text(&self, channel_id: ChannelId, text: &str) -> RelayResult<MessageId>;

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<()>;

    async fn unpin_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<()>;

    async fn find_webhook(&self, channel_id: ChannelId, name: &str) -> RelayResult<Option<WebhookHandle>>;

    async fn create_webhook(&self, channel_id: ChannelId, name: &str) -> RelayResult<WebhookHandle>;

    /// Post through a webhook and wait for the delivered message id.
    async fn execute_webhook(&self, webhook: &WebhookHandle, post: &ImpersonatedPost) -> RelayResult<MessageId>;
}
