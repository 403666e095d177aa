use crate::collab::MeetingMetadata;
use serde::{Deserialize, Serialize};

/// Client → server wire message. Exactly one variant per frame; the `type`
/// tag is the oneof discriminant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    InitialSetup {
        /// Empty or absent means the server assigns an id.
        #[serde(default)]
        meeting_id: Option<String>,
        audio_format: String,
        #[serde(default)]
        metadata: MeetingMetadata,
    },
    AudioChunk {
        /// Raw payload bytes, base64 on the wire.
        #[serde(with = "audio_bytes")]
        content: Vec<u8>,
        sequence_number: u64,
    },
    ImportanceMarker {
        item_name: String,
        importance_score: f64,
        #[serde(default)]
        details: String,
        timestamp_ms: u64,
    },
}

/// Server → client wire message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Confirmation {
        meeting_id: String,
        success: bool,
        message: String,
    },
    PartialTranscription {
        transcript_segment: String,
        sequence_number: u64,
        is_interim: bool,
    },
    FinalTranscription {
        full_transcript: String,
    },
    SummaryResult {
        summary_text: String,
    },
    ImportanceAck {
        item_name: String,
        success: bool,
        message: String,
    },
    StreamError {
        code: u32,
        message: String,
    },
}

mod audio_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
