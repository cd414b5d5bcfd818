use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use pinforge_commands::{CommandResponse, DEFAULT_PREFIX};
use pinforge_core::{
    ChannelId, ChannelInfo, ChatPlatform, ImpersonatedPost, MessageId, MessageSnapshot, PinRecord,
    PinStore, RelayError, RelayResult, UserRef,
};

use crate::links::message_link;
use crate::notices::Notices;
use crate::routing::ArchiveRouting;
use crate::webhooks::WebhookCache;

/// Audit-log reason attached to auto-created archive channels.
const ARCHIVE_CREATE_REASON: &str = "Auto-created by bot for pin forwarding";

pub const DEFAULT_WEBHOOK_NAME: &str = "PinForwarder";
pub const DEFAULT_FOOTER: &str = "🤖 Pin Controller Bot";
pub const DEFAULT_TRANSIENT_TTL: Duration = Duration::from_secs(5);

/// Runtime knobs of the relay.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub prefix: String,
    pub webhook_name: String,
    pub footer: Option<String>,
    /// Lifetime of transient error notices.
    pub transient_ttl: Duration,
    pub routing: ArchiveRouting,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            webhook_name: DEFAULT_WEBHOOK_NAME.to_string(),
            footer: Some(DEFAULT_FOOTER.to_string()),
            transient_ttl: DEFAULT_TRANSIENT_TTL,
            routing: ArchiveRouting::default(),
        }
    }
}

/// The message that caused a relocation: a pin command or a pin system notice.
#[derive(Debug, Clone)]
pub struct PinTrigger {
    /// Channel the trigger was posted in.
    pub channel: ChannelInfo,
    /// Who pinned.
    pub actor: UserRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The bot may not manage webhooks in the guild.
    MissingPermission,
    /// The archive channel was missing and could not be created.
    ArchiveUnavailable,
    /// A pin notice arrived but the channel has no pins.
    NothingPinned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocateOutcome {
    Relocated(PinRecord),
    Skipped(SkipReason),
    Failed(RelayError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnpinOutcome {
    Unpinned(PinRecord),
    NotRegistered,
    /// The archive channel recorded for the pin no longer exists.
    ArchiveMissing,
    Failed(RelayError),
}

/// Relocates pinned messages to an archive channel and reverses it.
///
/// Failures never escape: every public operation logs and returns an outcome.
///
/// Relocations and unpins run one at a time; each holds `sequence` from the
/// record lookup to the last mutation.
pub struct PinRelay {
    platform: Arc<dyn ChatPlatform>,
    store: PinStore,
    settings: RelaySettings,
    notices: Notices,
    webhooks: WebhookCache,
    sequence: Mutex<()>,
}

impl PinRelay {
    pub fn new(platform: Arc<dyn ChatPlatform>, store: PinStore, settings: RelaySettings) -> Self {
        let notices = Notices::new(settings.prefix.clone(), settings.footer.clone());
        Self {
            platform,
            store,
            settings,
            notices,
            webhooks: WebhookCache::new(),
            sequence: Mutex::new(()),
        }
    }

    pub fn platform(&self) -> &Arc<dyn ChatPlatform> {
        &self.platform
    }

    pub fn store(&self) -> &PinStore {
        &self.store
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    // -----------------------------------------------------------------------
    // Relocate
    // -----------------------------------------------------------------------

    /// Move `subject` into the archive channel on behalf of `trigger.actor`.
    pub async fn relocate(&self, trigger: &PinTrigger, subject: &MessageSnapshot) -> RelocateOutcome {
        let _sequence = self.sequence.lock().await;
        match self.try_relocate(trigger, subject).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    message_id = subject.id,
                    channel = %trigger.channel.name,
                    error = %e,
                    "Error processing pinned message"
                );
                RelocateOutcome::Failed(e)
            }
        }
    }

    /// Relocate whatever was pinned most recently in the trigger's channel.
    pub async fn relocate_latest_pin(&self, trigger: &PinTrigger) -> RelocateOutcome {
        match self.platform.latest_pin(trigger.channel.id).await {
            Ok(Some(subject)) => self.relocate(trigger, &subject).await,
            Ok(None) => {
                debug!(channel = %trigger.channel.name, "Pin notice without pinned messages");
                RelocateOutcome::Skipped(SkipReason::NothingPinned)
            }
            Err(e) => {
                error!(channel = %trigger.channel.name, error = %e, "Failed to list pinned messages");
                RelocateOutcome::Failed(e)
            }
        }
    }

    async fn try_relocate(&self, trigger: &PinTrigger, subject: &MessageSnapshot) -> RelayResult<RelocateOutcome> {
        let origin = &trigger.channel;
        let guild_id = origin.guild_id;

        match self.platform.can_manage_webhooks(guild_id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(guild_id, "Missing manage_webhooks permission; not relocating pin");
                return Ok(RelocateOutcome::Skipped(SkipReason::MissingPermission));
            }
            Err(e) => {
                warn!(guild_id, error = %e, "Could not check manage_webhooks permission; not relocating pin");
                return Ok(RelocateOutcome::Skipped(SkipReason::MissingPermission));
            }
        }

        let Some(archive) = self.resolve_archive(origin).await else {
            return Ok(RelocateOutcome::Skipped(SkipReason::ArchiveUnavailable));
        };

        let original_link = message_link(guild_id, origin.id, subject.id);

        let notification = self.notices.pin_notification(
            &trigger.actor,
            &subject.author,
            origin,
            &original_link,
            subject.id,
        );
        let notification_id = self.platform.send_notice(archive.id, &notification).await?;

        let relocated_id = self.post_impersonated(archive.id, subject).await?;
        let relocated_link = message_link(archive.guild_id, archive.id, relocated_id);

        let record = PinRecord {
            notification_artifact_id: notification_id,
            relocated_artifact_id: relocated_id,
            origin_channel_id: origin.id,
            archive_channel_id: archive.id,
            original_link: original_link.clone(),
            relocated_link: relocated_link.clone(),
            pinned_at: Utc::now(),
        };
        if let Some(previous) = self.store.put(PinStore::key(subject.id), record.clone()).await {
            warn!(
                message_id = subject.id,
                orphaned_notification = previous.notification_artifact_id,
                orphaned_copy = previous.relocated_artifact_id,
                "Message relocated twice; earlier artifacts are no longer tracked"
            );
        }

        self.platform.unpin_message(subject.channel_id, subject.id).await?;

        let confirmation = self.notices.pin_confirmation(
            &trigger.actor,
            &subject.author,
            &original_link,
            &relocated_link,
            subject.id,
        );
        self.platform.send_notice(origin.id, &confirmation).await?;

        info!(
            message_id = subject.id,
            origin = %origin.name,
            archive = %archive.name,
            pinned_by = trigger.actor.id,
            "Relocated pinned message"
        );
        Ok(RelocateOutcome::Relocated(record))
    }

    /// Find the archive channel for `origin`, creating it when absent.
    async fn resolve_archive(&self, origin: &ChannelInfo) -> Option<ChannelInfo> {
        let name = self.settings.routing.archive_for(&origin.name);
        match self.platform.find_text_channel(origin.guild_id, name).await {
            Ok(Some(channel)) => return Some(channel),
            Ok(None) => {}
            Err(e) => {
                error!(archive = %name, error = %e, "Failed to look up archive channel");
                return None;
            }
        }

        match self
            .platform
            .create_text_channel(origin.guild_id, name, ARCHIVE_CREATE_REASON)
            .await
        {
            Ok(channel) => {
                info!(archive = %name, channel_id = channel.id, "Created archive channel");
                Some(channel)
            }
            Err(e) => {
                error!(archive = %name, error = %e, "Failed to create archive channel");
                None
            }
        }
    }

    /// Repost `subject` through the archive webhook under its author's identity.
    async fn post_impersonated(&self, archive_id: ChannelId, subject: &MessageSnapshot) -> RelayResult<MessageId> {
        let post = ImpersonatedPost::from_message(subject);
        let name = &self.settings.webhook_name;
        let webhook = self.webhooks.resolve(self.platform.as_ref(), archive_id, name).await?;

        match self.platform.execute_webhook(&webhook, &post).await {
            Ok(id) => Ok(id),
            Err(e) if e.is_not_found() => {
                warn!(webhook_id = webhook.id, "Cached webhook is gone; resolving a new one");
                self.webhooks.invalidate(archive_id).await;
                let webhook = self.webhooks.resolve(self.platform.as_ref(), archive_id, name).await?;
                self.platform.execute_webhook(&webhook, &post).await
            }
            Err(e) => Err(e),
        }
    }

    // -----------------------------------------------------------------------
    // Unpin
    // -----------------------------------------------------------------------

    /// Remove the archive artifacts of `message_id` and forget the pin.
    pub async fn unpin(&self, actor: &UserRef, message_id: MessageId) -> UnpinOutcome {
        let _sequence = self.sequence.lock().await;
        match self.try_unpin(actor, message_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(message_id, error = %e, "Error while unpinning");
                UnpinOutcome::Failed(e)
            }
        }
    }

    async fn try_unpin(&self, actor: &UserRef, message_id: MessageId) -> RelayResult<UnpinOutcome> {
        let key = PinStore::key(message_id);
        let Some(record) = self.store.get(&key).await else {
            info!(message_id, "Unpin requested for unregistered message");
            return Ok(UnpinOutcome::NotRegistered);
        };

        let archive = match self.platform.channel(record.archive_channel_id).await {
            Ok(channel) => channel,
            Err(e) if e.is_not_found() => {
                warn!(message_id, archive_channel_id = record.archive_channel_id, "Archive channel not found");
                return Ok(UnpinOutcome::ArchiveMissing);
            }
            Err(e) => return Err(e),
        };

        self.delete_artifact(archive.id, record.notification_artifact_id, "notification", message_id)
            .await;
        self.delete_artifact(archive.id, record.relocated_artifact_id, "relocated copy", message_id)
            .await;
        self.store.delete(&key).await;

        let original = self.platform.fetch_message(record.origin_channel_id, message_id).await?;

        let archive_notice = self.notices.unpin_archive(actor, &original.author);
        self.platform.send_notice(archive.id, &archive_notice).await?;

        let confirmation = self.notices.unpin_confirmation(actor, &original.author);
        self.platform.send_notice(record.origin_channel_id, &confirmation).await?;

        info!(message_id, unpinned_by = actor.id, archive = %archive.name, "Unpinned message");
        Ok(UnpinOutcome::Unpinned(record))
    }

    /// Best-effort delete; failures are logged and swallowed.
    async fn delete_artifact(&self, channel_id: ChannelId, artifact_id: MessageId, what: &str, message_id: MessageId) {
        match self.platform.delete_message(channel_id, artifact_id).await {
            Ok(()) => debug!(message_id, artifact_id, "Deleted {what}"),
            Err(e) if e.is_not_found() => {
                warn!(message_id, artifact_id, "{what} not found, may have been deleted manually")
            }
            Err(e) => warn!(message_id, artifact_id, error = %e, "Error deleting {what}"),
        }
    }

    // -----------------------------------------------------------------------
    // Responses
    // -----------------------------------------------------------------------

    /// Post a handler response into `channel_id`.
    pub async fn deliver(&self, channel_id: ChannelId, response: &CommandResponse) {
        let result = match response {
            CommandResponse::Silent => Ok(()),
            CommandResponse::Transient(text) => {
                self.platform
                    .send_transient(channel_id, text, self.settings.transient_ttl)
                    .await
            }
            CommandResponse::Reply(text) => self.platform.send_text(channel_id, text).await.map(|_| ()),
        };
        if let Err(e) = result {
            warn!(channel_id, error = %e, "Failed to deliver command response");
        }
    }
}
