use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serenity::builder::{CreateAttachment, CreateChannel, CreateMessage, CreateWebhook, ExecuteWebhook};
use serenity::http::Http;
use serenity::model::channel::ChannelType;
use serenity::model::id::{
    ChannelId as DiscordChannelId, GuildId as DiscordGuildId, MessageId as DiscordMessageId, RoleId,
    UserId as DiscordUserId,
};
use serenity::model::permissions::Permissions;
use serenity::model::webhook::Webhook;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use pinforge_core::{
    ChannelId, ChannelInfo, ChatPlatform, GuildId, ImpersonatedPost, MessageId, MessageSnapshot, Notice,
    RelayError, RelayResult, UserId, WebhookHandle,
};

use crate::convert;
use crate::error::map_error;

/// [`ChatPlatform`] over serenity's REST client.
pub struct DiscordPlatform {
    http: Arc<Http>,
    bot_user: OnceCell<UserId>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self {
            http,
            bot_user: OnceCell::new(),
        }
    }

    async fn bot_user_id(&self) -> RelayResult<UserId> {
        self.bot_user
            .get_or_try_init(|| async {
                let me = self.http.get_current_user().await.map_err(map_error)?;
                Ok(me.id.get())
            })
            .await
            .copied()
    }

    fn webhook_handle(webhook: &Webhook, channel_id: ChannelId) -> Option<WebhookHandle> {
        let url = webhook.url().ok()?;
        Some(WebhookHandle {
            id: webhook.id.get(),
            channel_id,
            name: webhook.name.clone().unwrap_or_default(),
            url,
        })
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    fn name(&self) -> &str {
        "discord"
    }

    async fn can_manage_webhooks(&self, guild_id: GuildId) -> RelayResult<bool> {
        let me = self.bot_user_id().await?;
        let guild = DiscordGuildId::new(guild_id);
        let partial = guild.to_partial_guild(&self.http).await.map_err(map_error)?;
        if partial.owner_id.get() == me {
            return Ok(true);
        }

        let member = guild.member(&self.http, DiscordUserId::new(me)).await.map_err(map_error)?;
        let everyone = RoleId::new(guild_id);
        let permissions = partial
            .roles
            .iter()
            .filter(|(id, _)| **id == everyone || member.roles.contains(*id))
            .fold(Permissions::empty(), |acc, (_, role)| acc | role.permissions);

        Ok(permissions.contains(Permissions::ADMINISTRATOR) || permissions.contains(Permissions::MANAGE_WEBHOOKS))
    }

    async fn channel(&self, channel_id: ChannelId) -> RelayResult<ChannelInfo> {
        let channel = DiscordChannelId::new(channel_id)
            .to_channel(&self.http)
            .await
            .map_err(map_error)?;
        channel
            .guild()
            .map(|c| convert::channel_info(&c))
            .ok_or_else(|| RelayError::NotFound(format!("channel {channel_id} is not a guild channel")))
    }

    async fn find_text_channel(&self, guild_id: GuildId, name: &str) -> RelayResult<Option<ChannelInfo>> {
        let channels = DiscordGuildId::new(guild_id)
            .channels(&self.http)
            .await
            .map_err(map_error)?;
        Ok(channels
            .values()
            .find(|c| c.kind == ChannelType::Text && c.name == name)
            .map(convert::channel_info))
    }

    async fn create_text_channel(&self, guild_id: GuildId, name: &str, reason: &str) -> RelayResult<ChannelInfo> {
        let builder = CreateChannel::new(name).kind(ChannelType::Text).audit_log_reason(reason);
        let channel = DiscordGuildId::new(guild_id)
            .create_channel(&self.http, builder)
            .await
            .map_err(map_error)?;
        Ok(convert::channel_info(&channel))
    }

    async fn fetch_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<MessageSnapshot> {
        let message = DiscordChannelId::new(channel_id)
            .message(&self.http, DiscordMessageId::new(message_id))
            .await
            .map_err(map_error)?;
        Ok(convert::snapshot(&message))
    }

    async fn latest_pin(&self, channel_id: ChannelId) -> RelayResult<Option<MessageSnapshot>> {
        let pins = DiscordChannelId::new(channel_id)
            .pins(&self.http)
            .await
            .map_err(map_error)?;
        Ok(pins.first().map(convert::snapshot))
    }

    async fn send_notice(&self, channel_id: ChannelId, notice: &Notice) -> RelayResult<MessageId> {
        let message = DiscordChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(convert::embed(notice)))
            .await
            .map_err(map_error)?;
        Ok(message.id.get())
    }

    async fn send_transient(&self, channel_id: ChannelId, text: &str, ttl: Duration) -> RelayResult<()> {
        let channel = DiscordChannelId::new(channel_id);
        let message = channel.say(&self.http, text).await.map_err(map_error)?;

        let http = Arc::clone(&self.http);
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Err(e) = channel.delete_message(&http, message.id).await {
                debug!(message_id = %message.id, error = %e, "Transient notice already gone");
            }
        });
        Ok(())
    }

    async fn send_text(&self, channel_id: ChannelId, text: &str) -> RelayResult<MessageId> {
        let message = DiscordChannelId::new(channel_id)
            .say(&self.http, text)
            .await
            .map_err(map_error)?;
        Ok(message.id.get())
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<()> {
        DiscordChannelId::new(channel_id)
            .delete_message(&self.http, DiscordMessageId::new(message_id))
            .await
            .map_err(map_error)
    }

    async fn unpin_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<()> {
        DiscordChannelId::new(channel_id)
            .unpin(&self.http, DiscordMessageId::new(message_id))
            .await
            .map_err(map_error)
    }

    async fn find_webhook(&self, channel_id: ChannelId, name: &str) -> RelayResult<Option<WebhookHandle>> {
        let webhooks = DiscordChannelId::new(channel_id)
            .webhooks(&self.http)
            .await
            .map_err(map_error)?;
        Ok(webhooks
            .iter()
            .filter(|w| w.name.as_deref() == Some(name))
            .find_map(|w| Self::webhook_handle(w, channel_id)))
    }

    async fn create_webhook(&self, channel_id: ChannelId, name: &str) -> RelayResult<WebhookHandle> {
        let webhook = DiscordChannelId::new(channel_id)
            .create_webhook(&self.http, CreateWebhook::new(name))
            .await
            .map_err(map_error)?;
        Self::webhook_handle(&webhook, channel_id)
            .ok_or_else(|| RelayError::Unexpected(format!("webhook {} has no token", webhook.id)))
    }

    async fn execute_webhook(&self, handle: &WebhookHandle, post: &ImpersonatedPost) -> RelayResult<MessageId> {
        let webhook = Webhook::from_url(&self.http, &handle.url).await.map_err(map_error)?;

        let mut files = Vec::with_capacity(post.attachments.len());
        for attachment in &post.attachments {
            match CreateAttachment::url(&self.http, &attachment.url).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(file = %attachment.filename, error = %e, "Could not download attachment");
                    return Err(map_error(e));
                }
            }
        }

        let mut builder = ExecuteWebhook::new()
            .content(&post.content)
            .username(&post.username)
            .add_files(files);
        if let Some(avatar) = &post.avatar_url {
            builder = builder.avatar_url(avatar);
        }

        let message = webhook
            .execute(&self.http, true, builder)
            .await
            .map_err(map_error)?
            .ok_or_else(|| RelayError::Unexpected("webhook did not return the posted message".into()))?;
        Ok(message.id.get())
    }
}
