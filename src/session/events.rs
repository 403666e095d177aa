use crate::collab::MeetingMetadata;
use serde::{Deserialize, Serialize};

/// Stable numeric error codes carried by `StreamError` wire messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Wrong event for the current session state (protocol violation).
    InvalidSequence,
    /// Undecodable wire message or empty/unknown discriminant.
    InvalidMessage,
    /// Reorder window overflow; audio continues past the skipped gap.
    AudioGap,
    /// Transcription collaborator failed for one call.
    TranscriptionFailure,
    /// Summarization collaborator failed.
    SummarizationFailure,
}

impl ErrorCode {
    pub fn code(self) -> u32 {
        match self {
            ErrorCode::InvalidSequence => 1,
            ErrorCode::InvalidMessage => 2,
            ErrorCode::AudioGap => 3,
            ErrorCode::TranscriptionFailure => 4,
            ErrorCode::SummarizationFailure => 5,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ErrorCode::InvalidSequence),
            2 => Some(ErrorCode::InvalidMessage),
            3 => Some(ErrorCode::AudioGap),
            4 => Some(ErrorCode::TranscriptionFailure),
            5 => Some(ErrorCode::SummarizationFailure),
            _ => None,
        }
    }
}

/// First message of every stream: identifies (or requests) the meeting and
/// carries its embedded metadata.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    /// Client-supplied meeting id; `None` or empty means server-assigned.
    pub meeting_id: Option<String>,
    pub audio_format: String,
    pub metadata: MeetingMetadata,
}

/// One client audio payload. Consumed exactly once by the reorder buffer.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub sequence_number: u64,
    pub content: Vec<u8>,
}

/// A user-triggered importance bookmark. Not part of audio sequencing.
#[derive(Debug, Clone)]
pub struct ImportanceMarker {
    pub item_name: String,
    pub importance_score: f64,
    pub details: String,
    pub timestamp_ms: u64,
}

/// One transcription result from the collaborator. Interim segments may be
/// superseded by a later non-interim segment with the same sequence number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    pub sequence_number: u64,
    pub text: String,
    pub is_interim: bool,
}

/// Typed inbound event, decoded from a client wire message.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Setup(SetupRequest),
    Audio(AudioChunk),
    Marker(ImportanceMarker),
}

/// Typed outbound event, encoded into a server wire message.
#[derive(Debug, Clone)]
pub enum ServerEvent {
    Confirmation {
        meeting_id: String,
        success: bool,
        message: String,
    },
    Partial(TranscriptionSegment),
    Final {
        full_transcript: String,
    },
    Summary {
        summary_text: String,
    },
    MarkerAck {
        item_name: String,
        success: bool,
        message: String,
    },
    Error {
        code: ErrorCode,
        message: String,
    },
}
