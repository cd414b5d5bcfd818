//! Per-archive-channel cache of impersonation webhooks.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::{debug, info};

use pinforge_core::{ChannelId, ChatPlatform, RelayResult, WebhookHandle};

/// Resolves a named webhook once per channel and hands out the cached handle.
#[derive(Debug, Default)]
pub struct WebhookCache {
    handles: Mutex<HashMap<ChannelId, WebhookHandle>>,
}

impl WebhookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `channel_id`, else an existing webhook called `name`,
    /// else a freshly created one.
    pub async fn resolve(
        &self,
        platform: &dyn ChatPlatform,
        channel_id: ChannelId,
        name: &str,
    ) -> RelayResult<WebhookHandle> {
        let mut handles = self.handles.lock().await;
        if let Some(handle) = handles.get(&channel_id) {
            return Ok(handle.clone());
        }

        let handle = match platform.find_webhook(channel_id, name).await? {
            Some(existing) => {
                debug!(channel_id, webhook_id = existing.id, "Reusing existing webhook");
                existing
            }
            None => {
                let created = platform.create_webhook(channel_id, name).await?;
                info!(channel_id, webhook_id = created.id, name = %name, "Created webhook");
                created
            }
        };
        handles.insert(channel_id, handle.clone());
        Ok(handle)
    }

    /// Forget the handle for `channel_id` so the next resolve looks it up again.
    pub async fn invalidate(&self, channel_id: ChannelId) -> Option<WebhookHandle> {
        self.handles.lock().await.remove(&channel_id)
    }

    pub async fn cached(&self, channel_id: ChannelId) -> Option<WebhookHandle> {
        self.handles.lock().await.get(&channel_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPlatform;

    #[tokio::test]
    async fn creates_once_then_caches() {
        let platform = MockPlatform::new(1);
        let pins = platform.add_channel("pins");
        let cache = WebhookCache::new();

        let first = cache.resolve(&platform, pins.id, "PinForwarder").await.unwrap();
        let second = cache.resolve(&platform, pins.id, "PinForwarder").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(platform.webhook_creations(), 1);
    }

    #[tokio::test]
    async fn adopts_existing_webhook_by_name() {
        let platform = MockPlatform::new(1);
        let pins = platform.add_channel("pins");
        let existing = platform.add_webhook(pins.id, "PinForwarder");
        let cache = WebhookCache::new();

        let handle = cache.resolve(&platform, pins.id, "PinForwarder").await.unwrap();
        assert_eq!(handle.id, existing.id);
        assert_eq!(platform.webhook_creations(), 0);
    }

    #[tokio::test]
    async fn invalidate_forces_lookup() {
        let platform = MockPlatform::new(1);
        let pins = platform.add_channel("pins");
        let cache = WebhookCache::new();

        let first = cache.resolve(&platform, pins.id, "PinForwarder").await.unwrap();
        platform.expire_webhook(first.id);
        assert!(cache.invalidate(pins.id).await.is_some());
        assert!(cache.cached(pins.id).await.is_none());

        let second = cache.resolve(&platform, pins.id, "PinForwarder").await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(platform.webhook_creations(), 2);
    }
}
