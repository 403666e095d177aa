use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Descriptive metadata for a meeting, embedded in the stream setup message
/// and persisted through the [`MetadataStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingMetadata {
    #[serde(default)]
    pub title: String,

    /// Meeting date as supplied by the client (e.g. "2026-08-25").
    #[serde(default)]
    pub meeting_date: String,

    #[serde(default)]
    pub attendees: Vec<String>,

    #[serde(default)]
    pub notes: String,
}

/// Partial update for an existing meeting record. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub meeting_date: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// A persisted meeting record.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingRecord {
    pub meeting_id: String,
    pub metadata: MeetingMetadata,
    pub saved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Meeting metadata persistence collaborator.
///
/// `save` is idempotent: saving the same meeting id again overwrites the
/// record in place. Both the streaming setup path and the unary
/// `MeetingService::save_metadata` operation go through this one operation.
#[async_trait::async_trait]
pub trait MetadataStore: Send + Sync {
    async fn save(&self, meeting_id: &str, metadata: &MeetingMetadata) -> Result<()>;

    /// Apply a partial update. Returns `false` if the meeting is unknown.
    async fn edit(&self, meeting_id: &str, patch: &MetadataPatch) -> Result<bool>;

    /// Returns `false` if the meeting is unknown.
    async fn delete(&self, meeting_id: &str) -> Result<bool>;

    async fn get(&self, meeting_id: &str) -> Result<Option<MeetingRecord>>;
}

/// In-memory metadata store, used by the demo binary and tests.
#[derive(Default)]
pub struct MemoryMetadataStore {
    records: RwLock<HashMap<String, MeetingRecord>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn save(&self, meeting_id: &str, metadata: &MeetingMetadata) -> Result<()> {
        let mut records = self.records.write().await;
        let now = Utc::now();

        let record = records
            .entry(meeting_id.to_string())
            .or_insert_with(|| MeetingRecord {
                meeting_id: meeting_id.to_string(),
                metadata: metadata.clone(),
                saved_at: now,
                updated_at: now,
            });
        record.metadata = metadata.clone();
        record.updated_at = now;

        info!(meeting_id, "metadata saved");
        Ok(())
    }

    async fn edit(&self, meeting_id: &str, patch: &MetadataPatch) -> Result<bool> {
        let mut records = self.records.write().await;

        let Some(record) = records.get_mut(meeting_id) else {
            debug!(meeting_id, "edit requested for unknown meeting");
            return Ok(false);
        };

        if let Some(title) = &patch.title {
            record.metadata.title = title.clone();
        }
        if let Some(date) = &patch.meeting_date {
            record.metadata.meeting_date = date.clone();
        }
        if let Some(attendees) = &patch.attendees {
            record.metadata.attendees = attendees.clone();
        }
        if let Some(notes) = &patch.notes {
            record.metadata.notes = notes.clone();
        }
        record.updated_at = Utc::now();

        info!(meeting_id, "metadata edited");
        Ok(true)
    }

    async fn delete(&self, meeting_id: &str) -> Result<bool> {
        let removed = self.records.write().await.remove(meeting_id).is_some();
        if removed {
            info!(meeting_id, "metadata deleted");
        }
        Ok(removed)
    }

    async fn get(&self, meeting_id: &str) -> Result<Option<MeetingRecord>> {
        Ok(self.records.read().await.get(meeting_id).cloned())
    }
}
