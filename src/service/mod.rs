//! Unary companion operations
//!
//! The legacy, non-streaming entry points that coexist with the stream:
//! metadata save/edit/delete, importance bookmarks, and a one-shot
//! transcribe-and-summarize over a complete recording. They run over the
//! same collaborators as the streaming path; metadata persistence in
//! particular is the same idempotent store operation the stream setup uses.

use crate::collab::{Collaborators, MeetingMetadata, MetadataPatch};
use crate::session::AudioChunk;
use futures::StreamExt;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct SaveMetadataResponse {
    pub meeting_id: String,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditMetadataResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteMetadataResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveImportanceResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscribeAndSummarizeResponse {
    pub transcription: String,
    pub summary: String,
    pub error_message: String,
}

/// Unary meeting operations. Errors are folded into the response's success
/// flag and message, never surfaced as transport failures.
pub struct MeetingService {
    collaborators: Collaborators,
}

impl MeetingService {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// Save meeting metadata, assigning an id if none is given. Idempotent:
    /// saving the same id again overwrites in place.
    pub async fn save_metadata(
        &self,
        meeting_id: Option<String>,
        metadata: MeetingMetadata,
    ) -> SaveMetadataResponse {
        let meeting_id = meeting_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("meeting-{}", uuid::Uuid::new_v4()));

        match self.collaborators.store.save(&meeting_id, &metadata).await {
            Ok(()) => SaveMetadataResponse {
                meeting_id: meeting_id.clone(),
                success: true,
                message: format!("metadata saved for {meeting_id}"),
            },
            Err(e) => {
                warn!(meeting_id, error = %e, "metadata save failed");
                SaveMetadataResponse {
                    meeting_id,
                    success: false,
                    message: format!("metadata save failed: {e:#}"),
                }
            }
        }
    }

    pub async fn edit_metadata(
        &self,
        meeting_id: &str,
        patch: MetadataPatch,
    ) -> EditMetadataResponse {
        match self.collaborators.store.edit(meeting_id, &patch).await {
            Ok(true) => EditMetadataResponse {
                success: true,
                message: format!("metadata updated for {meeting_id}"),
            },
            Ok(false) => EditMetadataResponse {
                success: false,
                message: format!("meeting {meeting_id} not found"),
            },
            Err(e) => {
                warn!(meeting_id, error = %e, "metadata edit failed");
                EditMetadataResponse {
                    success: false,
                    message: format!("metadata edit failed: {e:#}"),
                }
            }
        }
    }

    pub async fn delete_metadata(&self, meeting_id: &str) -> DeleteMetadataResponse {
        match self.collaborators.store.delete(meeting_id).await {
            Ok(true) => DeleteMetadataResponse {
                success: true,
                message: format!("meeting {meeting_id} deleted"),
            },
            Ok(false) => DeleteMetadataResponse {
                success: false,
                message: format!("meeting {meeting_id} not found"),
            },
            Err(e) => {
                warn!(meeting_id, error = %e, "metadata delete failed");
                DeleteMetadataResponse {
                    success: false,
                    message: format!("metadata delete failed: {e:#}"),
                }
            }
        }
    }

    /// Record an importance bookmark outside any stream.
    pub async fn save_importance(
        &self,
        item_name: &str,
        importance: f64,
        details: &str,
    ) -> SaveImportanceResponse {
        info!(item = item_name, importance, details, "importance saved");
        SaveImportanceResponse {
            success: true,
            message: format!("importance saved for {item_name}"),
        }
    }

    /// One-shot batch path: transcribe a complete recording, then summarize.
    pub async fn transcribe_and_summarize(
        &self,
        audio_data: Vec<u8>,
        audio_format: &str,
    ) -> TranscribeAndSummarizeResponse {
        info!(
            audio_format,
            bytes = audio_data.len(),
            "one-shot transcription requested"
        );

        let chunk = AudioChunk {
            sequence_number: 0,
            content: audio_data,
        };

        let mut transcript_parts: Vec<String> = Vec::new();
        for result in [
            self.collaborators.transcriber.feed(&chunk).await,
            self.collaborators.transcriber.flush().await,
        ] {
            let mut segments = match result {
                Ok(segments) => segments,
                Err(e) => {
                    warn!(error = %e, "one-shot transcription failed");
                    return TranscribeAndSummarizeResponse {
                        transcription: String::new(),
                        summary: String::new(),
                        error_message: format!("transcription failed: {e:#}"),
                    };
                }
            };
            while let Some(segment) = segments.next().await {
                if !segment.is_interim {
                    transcript_parts.push(segment.text);
                }
            }
        }
        let transcription = transcript_parts.join(" ");

        match self.collaborators.summarizer.summarize(&transcription).await {
            Ok(summary) => TranscribeAndSummarizeResponse {
                transcription,
                summary,
                error_message: String::new(),
            },
            Err(e) => {
                warn!(error = %e, "one-shot summarization failed");
                TranscribeAndSummarizeResponse {
                    transcription,
                    summary: String::new(),
                    error_message: format!("summarization failed: {e:#}"),
                }
            }
        }
    }
}
