use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::types::{ChannelId, MessageId};

/// Correlation between a relocated message and the artifacts it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRecord {
    pub notification_artifact_id: MessageId,
    pub relocated_artifact_id: MessageId,
    pub origin_channel_id: ChannelId,
    /// Channel holding both artifacts.
    pub archive_channel_id: ChannelId,
    pub original_link: String,
    pub relocated_link: String,
    pub pinned_at: DateTime<Utc>,
}

/// Volatile, process-wide set of [`PinRecord`]s keyed by original message id.
///
/// Cloning shares the same underlying map. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct PinStore {
    records: Arc<Mutex<HashMap<String, PinRecord>>>,
}

impl PinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical key for a message id.
    pub fn key(message_id: MessageId) -> String {
        message_id.to_string()
    }

    pub async fn get(&self, key: &str) -> Option<PinRecord> {
        self.records.lock().await.get(key).cloned()
    }

    /// Insert or replace; returns the replaced record if the key was active.
    pub async fn put(&self, key: impl Into<String>, record: PinRecord) -> Option<PinRecord> {
        let key = key.into();
        debug!(key = %key, "Recording pin correlation");
        self.records.lock().await.insert(key, record)
    }

    pub async fn delete(&self, key: &str) -> Option<PinRecord> {
        debug!(key = %key, "Dropping pin correlation");
        self.records.lock().await.remove(key)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.records.lock().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
