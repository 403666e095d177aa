use super::messages::{ClientMessage, ServerMessage};
use crate::session::{
    AudioChunk, ClientEvent, ImportanceMarker, ServerEvent, SetupRequest, TranscriptionSegment,
};

/// Stateless translation between wire frames and typed session events.
///
/// Owns no session data: message legality against the session state is the
/// machine's job, not the codec's. A decode failure maps to exactly one
/// INVALID_MESSAGE error at the call site; it never crashes the stream.
pub struct StreamCodec;

impl StreamCodec {
    /// Decode one client frame into exactly one typed inbound event.
    pub fn decode(frame: &[u8]) -> Result<ClientEvent, serde_json::Error> {
        let message: ClientMessage = serde_json::from_slice(frame)?;

        Ok(match message {
            ClientMessage::InitialSetup {
                meeting_id,
                audio_format,
                metadata,
            } => ClientEvent::Setup(SetupRequest {
                meeting_id,
                audio_format,
                metadata,
            }),
            ClientMessage::AudioChunk {
                content,
                sequence_number,
            } => ClientEvent::Audio(AudioChunk {
                sequence_number,
                content,
            }),
            ClientMessage::ImportanceMarker {
                item_name,
                importance_score,
                details,
                timestamp_ms,
            } => ClientEvent::Marker(ImportanceMarker {
                item_name,
                importance_score,
                details,
                timestamp_ms,
            }),
        })
    }

    /// Encode one typed outbound event into exactly one server frame.
    pub fn encode(event: &ServerEvent) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&ServerMessage::from(event))
    }
}

impl From<&ServerEvent> for ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Confirmation {
                meeting_id,
                success,
                message,
            } => ServerMessage::Confirmation {
                meeting_id: meeting_id.clone(),
                success: *success,
                message: message.clone(),
            },
            ServerEvent::Partial(TranscriptionSegment {
                sequence_number,
                text,
                is_interim,
            }) => ServerMessage::PartialTranscription {
                transcript_segment: text.clone(),
                sequence_number: *sequence_number,
                is_interim: *is_interim,
            },
            ServerEvent::Final { full_transcript } => ServerMessage::FinalTranscription {
                full_transcript: full_transcript.clone(),
            },
            ServerEvent::Summary { summary_text } => ServerMessage::SummaryResult {
                summary_text: summary_text.clone(),
            },
            ServerEvent::MarkerAck {
                item_name,
                success,
                message,
            } => ServerMessage::ImportanceAck {
                item_name: item_name.clone(),
                success: *success,
                message: message.clone(),
            },
            ServerEvent::Error { code, message } => ServerMessage::StreamError {
                code: code.code(),
                message: message.clone(),
            },
        }
    }
}
