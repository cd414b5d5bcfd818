//! In-memory [`ChatPlatform`] with a single guild.
//!
//! Stores channels, messages, pins and webhooks, and lets tests inject
//! failures per operation.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use pinforge_core::{
    AttachmentRef, ChannelId, ChannelInfo, ChatPlatform, GuildId, ImpersonatedPost, MessageId,
    MessageSnapshot, Notice, RelayError, RelayResult, UserRef, WebhookHandle,
};

pub const BOT_USER_ID: u64 = 900;

/// A stored message.
#[derive(Debug, Clone)]
pub struct MockMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author: UserRef,
    pub content: String,
    pub attachments: Vec<AttachmentRef>,
    pub pinned: bool,
    /// Order in which pins happened; higher is more recent.
    pub pin_seq: u64,
    pub notice: Option<Notice>,
    pub webhook_id: Option<u64>,
}

#[derive(Debug, Default)]
struct MockState {
    can_manage_webhooks: bool,
    permission_failure: Option<RelayError>,
    yield_on_calls: bool,
    channels: Vec<ChannelInfo>,
    messages: HashMap<MessageId, MockMessage>,
    webhooks: Vec<WebhookHandle>,
    stale_webhooks: HashSet<u64>,
    transients: Vec<(ChannelId, String, Duration)>,
    fail_channel_creation: bool,
    delete_failures: HashMap<MessageId, RelayError>,
    fetch_failures: HashMap<MessageId, RelayError>,
    channel_creations: usize,
    webhook_creations: usize,
    next_id: u64,
    next_pin_seq: u64,
}

pub struct MockPlatform {
    guild_id: GuildId,
    state: Mutex<MockState>,
}

impl MockPlatform {
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            state: Mutex::new(MockState {
                can_manage_webhooks: true,
                next_id: 1_000,
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn bot() -> UserRef {
        UserRef::new(BOT_USER_ID, "pinforge")
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    // -- setup -------------------------------------------------------------

    pub fn set_can_manage_webhooks(&self, allowed: bool) {
        self.state().can_manage_webhooks = allowed;
    }

    pub fn fail_permission_check(&self, error: RelayError) {
        self.state().permission_failure = Some(error);
    }

    /// Make channel lookups and deletes yield to the scheduler first, so
    /// concurrent operations interleave at those points.
    pub fn yield_on_calls(&self) {
        self.state().yield_on_calls = true;
    }

    async fn maybe_yield(&self) {
        let yielding = self.state().yield_on_calls;
        if yielding {
            tokio::task::yield_now().await;
        }
    }

    pub fn add_channel(&self, name: &str) -> ChannelInfo {
        let mut state = self.state();
        state.next_id += 1;
        let channel = ChannelInfo::new(state.next_id, self.guild_id, name);
        state.channels.push(channel.clone());
        channel
    }

    pub fn remove_channel(&self, channel_id: ChannelId) {
        let mut state = self.state();
        state.channels.retain(|c| c.id != channel_id);
        state.messages.retain(|_, m| m.channel_id != channel_id);
    }

    /// Store a user message with an explicit id.
    pub fn post_with_id(&self, channel_id: ChannelId, id: MessageId, author: UserRef, content: &str) {
        let mut state = self.state();
        state.messages.insert(
            id,
            MockMessage {
                id,
                channel_id,
                author,
                content: content.to_string(),
                attachments: Vec::new(),
                pinned: false,
                pin_seq: 0,
                notice: None,
                webhook_id: None,
            },
        );
    }

    /// Store a user message and return its generated id.
    pub fn post(&self, channel_id: ChannelId, author: UserRef, content: &str) -> MessageId {
        let id = {
            let mut state = self.state();
            state.next_id += 1;
            state.next_id
        };
        self.post_with_id(channel_id, id, author, content);
        id
    }

    pub fn attach(&self, message_id: MessageId, filename: &str, url: &str) {
        if let Some(message) = self.state().messages.get_mut(&message_id) {
            message.attachments.push(AttachmentRef {
                filename: filename.to_string(),
                url: url.to_string(),
            });
        }
    }

    pub fn pin(&self, message_id: MessageId) {
        let mut state = self.state();
        state.next_pin_seq += 1;
        let seq = state.next_pin_seq;
        if let Some(message) = state.messages.get_mut(&message_id) {
            message.pinned = true;
            message.pin_seq = seq;
        }
    }

    /// Remove a message behind the relay's back.
    pub fn remove_message(&self, message_id: MessageId) {
        self.state().messages.remove(&message_id);
    }

    pub fn add_webhook(&self, channel_id: ChannelId, name: &str) -> WebhookHandle {
        let mut state = self.state();
        state.next_id += 1;
        let handle = WebhookHandle {
            id: state.next_id,
            channel_id,
            name: name.to_string(),
            url: format!("https://discord.com/api/webhooks/{}/token", state.next_id),
        };
        state.webhooks.push(handle.clone());
        handle
    }

    /// Delete a webhook; executing a handle to it fails with `NotFound`.
    pub fn expire_webhook(&self, webhook_id: u64) {
        let mut state = self.state();
        state.webhooks.retain(|w| w.id != webhook_id);
        state.stale_webhooks.insert(webhook_id);
    }

    pub fn fail_channel_creation(&self) {
        self.state().fail_channel_creation = true;
    }

    pub fn fail_delete(&self, message_id: MessageId, error: RelayError) {
        self.state().delete_failures.insert(message_id, error);
    }

    pub fn fail_fetch(&self, message_id: MessageId, error: RelayError) {
        self.state().fetch_failures.insert(message_id, error);
    }

    // -- inspection --------------------------------------------------------

    pub fn channel_named(&self, name: &str) -> Option<ChannelInfo> {
        self.state().channels.iter().find(|c| c.name == name).cloned()
    }

    pub fn message(&self, message_id: MessageId) -> Option<MockMessage> {
        self.state().messages.get(&message_id).cloned()
    }

    /// Messages of a channel in id order.
    pub fn messages_in(&self, channel_id: ChannelId) -> Vec<MockMessage> {
        let mut messages: Vec<_> = self
            .state()
            .messages
            .values()
            .filter(|m| m.channel_id == channel_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.id);
        messages
    }

    pub fn transients(&self) -> Vec<(ChannelId, String, Duration)> {
        self.state().transients.clone()
    }

    pub fn channel_creations(&self) -> usize {
        self.state().channel_creations
    }

    pub fn webhook_creations(&self) -> usize {
        self.state().webhook_creations
    }

    fn insert_bot_message(state: &mut MockState, channel_id: ChannelId, content: &str, notice: Option<Notice>) -> MessageId {
        state.next_id += 1;
        let id = state.next_id;
        state.messages.insert(
            id,
            MockMessage {
                id,
                channel_id,
                author: Self::bot(),
                content: content.to_string(),
                attachments: Vec::new(),
                pinned: false,
                pin_seq: 0,
                notice,
                webhook_id: None,
            },
        );
        id
    }

    fn require_channel(state: &MockState, channel_id: ChannelId) -> RelayResult<()> {
        if state.channels.iter().any(|c| c.id == channel_id) {
            Ok(())
        } else {
            Err(RelayError::NotFound(format!("channel {channel_id}")))
        }
    }

    fn snapshot(message: &MockMessage) -> MessageSnapshot {
        MessageSnapshot {
            id: message.id,
            channel_id: message.channel_id,
            author: message.author.clone(),
            content: message.content.clone(),
            attachments: message.attachments.clone(),
            pinned: message.pinned,
        }
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    fn name(&self) -> &str {
        "mock"
    }

    async fn can_manage_webhooks(&self, _guild_id: GuildId) -> RelayResult<bool> {
        let state = self.state();
        match &state.permission_failure {
            Some(e) => Err(e.clone()),
            None => Ok(state.can_manage_webhooks),
        }
    }

    async fn channel(&self, channel_id: ChannelId) -> RelayResult<ChannelInfo> {
        self.maybe_yield().await;
        self.state()
            .channels
            .iter()
            .find(|c| c.id == channel_id)
            .cloned()
            .ok_or_else(|| RelayError::NotFound(format!("channel {channel_id}")))
    }

    async fn find_text_channel(&self, guild_id: GuildId, name: &str) -> RelayResult<Option<ChannelInfo>> {
        Ok(self
            .state()
            .channels
            .iter()
            .find(|c| c.guild_id == guild_id && c.name == name)
            .cloned())
    }

    async fn create_text_channel(&self, guild_id: GuildId, name: &str, _reason: &str) -> RelayResult<ChannelInfo> {
        let mut state = self.state();
        if state.fail_channel_creation {
            return Err(RelayError::Permission("missing manage channels".into()));
        }
        state.next_id += 1;
        state.channel_creations += 1;
        let channel = ChannelInfo::new(state.next_id, guild_id, name);
        state.channels.push(channel.clone());
        Ok(channel)
    }

    async fn fetch_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<MessageSnapshot> {
        let state = self.state();
        if let Some(error) = state.fetch_failures.get(&message_id) {
            return Err(error.clone());
        }
        state
            .messages
            .get(&message_id)
            .filter(|m| m.channel_id == channel_id)
            .map(Self::snapshot)
            .ok_or_else(|| RelayError::NotFound(format!("message {message_id}")))
    }

    async fn latest_pin(&self, channel_id: ChannelId) -> RelayResult<Option<MessageSnapshot>> {
        let state = self.state();
        Self::require_channel(&state, channel_id)?;
        Ok(state
            .messages
            .values()
            .filter(|m| m.channel_id == channel_id && m.pinned)
            .max_by_key(|m| m.pin_seq)
            .map(Self::snapshot))
    }

    async fn send_notice(&self, channel_id: ChannelId, notice: &Notice) -> RelayResult<MessageId> {
        let mut state = self.state();
        Self::require_channel(&state, channel_id)?;
        Ok(Self::insert_bot_message(&mut state, channel_id, "", Some(notice.clone())))
    }

    async fn send_transient(&self, channel_id: ChannelId, text: &str, ttl: Duration) -> RelayResult<()> {
        self.state().transients.push((channel_id, text.to_string(), ttl));
        Ok(())
    }

    async fn send_text(&self, channel_id: ChannelId, text: &str) -> RelayResult<MessageId> {
        let mut state = self.state();
        Self::require_channel(&state, channel_id)?;
        Ok(Self::insert_bot_message(&mut state, channel_id, text, None))
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<()> {
        self.maybe_yield().await;
        let mut state = self.state();
        if let Some(error) = state.delete_failures.get(&message_id) {
            return Err(error.clone());
        }
        match state.messages.get(&message_id) {
            Some(m) if m.channel_id == channel_id => {
                state.messages.remove(&message_id);
                Ok(())
            }
            _ => Err(RelayError::NotFound(format!("message {message_id}"))),
        }
    }

    async fn unpin_message(&self, channel_id: ChannelId, message_id: MessageId) -> RelayResult<()> {
        match self.state().messages.get_mut(&message_id) {
            Some(m) if m.channel_id == channel_id => {
                m.pinned = false;
                Ok(())
            }
            _ => Err(RelayError::NotFound(format!("message {message_id}"))),
        }
    }

    async fn find_webhook(&self, channel_id: ChannelId, name: &str) -> RelayResult<Option<WebhookHandle>> {
        Ok(self
            .state()
            .webhooks
            .iter()
            .find(|w| w.channel_id == channel_id && w.name == name)
            .cloned())
    }

    async fn create_webhook(&self, channel_id: ChannelId, name: &str) -> RelayResult<WebhookHandle> {
        let handle = self.add_webhook(channel_id, name);
        self.state().webhook_creations += 1;
        Ok(handle)
    }

    async fn execute_webhook(&self, webhook: &WebhookHandle, post: &ImpersonatedPost) -> RelayResult<MessageId> {
        let mut state = self.state();
        if state.stale_webhooks.contains(&webhook.id) {
            return Err(RelayError::NotFound(format!("webhook {}", webhook.id)));
        }
        Self::require_channel(&state, webhook.channel_id)?;
        state.next_id += 1;
        let id = state.next_id;
        let mut author = UserRef::new(webhook.id, post.username.clone());
        author.avatar_url = post.avatar_url.clone();
        state.messages.insert(
            id,
            MockMessage {
                id,
                channel_id: webhook.channel_id,
                author,
                content: post.content.clone(),
                attachments: post.attachments.clone(),
                pinned: false,
                pin_seq: 0,
                notice: None,
                webhook_id: Some(webhook.id),
            },
        );
        Ok(id)
    }
}
