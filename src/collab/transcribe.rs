use crate::session::{AudioChunk, ErrorCode, ServerEvent, TranscriptionSegment};
use anyhow::Result;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lazy sequence of transcription segments produced by a collaborator call.
pub type SegmentStream = BoxStream<'static, TranscriptionSegment>;

/// Speech-to-text collaborator boundary.
///
/// Implementations receive strictly in-order audio payloads for one session
/// and may return results incrementally. Restartable only at session
/// granularity, never mid-segment.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Feed one in-order audio payload; returns whatever partial results the
    /// collaborator has at this point.
    async fn feed(&self, chunk: &AudioChunk) -> Result<SegmentStream>;

    /// Flush at end of input; returns any trailing segments.
    async fn flush(&self) -> Result<SegmentStream>;

    /// Collaborator name for logging.
    fn name(&self) -> &str;
}

/// Forwards ordered audio to the transcription collaborator and republishes
/// its results as outbound events.
///
/// Failures are per-call, not sticky: a failed payload is reported once and
/// the next payload is attempted normally.
pub struct TranscriptionRelay {
    transcriber: Arc<dyn Transcriber>,

    /// Non-interim segment text by sequence number; concatenated in order
    /// this is the final transcript.
    transcript: BTreeMap<u64, String>,
}

impl TranscriptionRelay {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            transcriber,
            transcript: BTreeMap::new(),
        }
    }

    /// Feed one accepted, in-order chunk. Returns the events to emit: one
    /// `Partial` per segment, or a single `TRANSCRIPTION_FAILURE` error.
    pub async fn feed(&mut self, chunk: &AudioChunk) -> Vec<ServerEvent> {
        match self.transcriber.feed(chunk).await {
            Ok(segments) => self.collect(segments).await,
            Err(e) => {
                warn!(
                    transcriber = self.transcriber.name(),
                    sequence = chunk.sequence_number,
                    error = %e,
                    "transcription call failed"
                );
                vec![ServerEvent::Error {
                    code: ErrorCode::TranscriptionFailure,
                    message: format!("transcription failed: {e:#}"),
                }]
            }
        }
    }

    /// Flush the collaborator and emit the final transcript.
    ///
    /// Returns the events to emit plus the full transcript text for the
    /// summarization trigger. A flush failure loses only trailing segments;
    /// the accumulated transcript is still emitted.
    pub async fn finalize(&mut self) -> (Vec<ServerEvent>, String) {
        let mut events = match self.transcriber.flush().await {
            Ok(segments) => self.collect(segments).await,
            Err(e) => {
                warn!(
                    transcriber = self.transcriber.name(),
                    error = %e,
                    "transcription flush failed"
                );
                vec![ServerEvent::Error {
                    code: ErrorCode::TranscriptionFailure,
                    message: format!("transcription flush failed: {e:#}"),
                }]
            }
        };

        let full_transcript = self
            .transcript
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        debug!(
            segments = self.transcript.len(),
            chars = full_transcript.len(),
            "final transcript assembled"
        );

        events.push(ServerEvent::Final {
            full_transcript: full_transcript.clone(),
        });

        (events, full_transcript)
    }

    async fn collect(&mut self, mut segments: SegmentStream) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Some(segment) = segments.next().await {
            if !segment.is_interim {
                self.transcript
                    .insert(segment.sequence_number, segment.text.clone());
            }
            events.push(ServerEvent::Partial(segment));
        }
        events
    }
}

/// Wiring-stub transcriber: echoes each payload back as one non-interim
/// segment. Deterministic, used by the demo binary and tests.
#[derive(Debug, Default)]
pub struct EchoTranscriber;

#[async_trait::async_trait]
impl Transcriber for EchoTranscriber {
    async fn feed(&self, chunk: &AudioChunk) -> Result<SegmentStream> {
        let segment = TranscriptionSegment {
            sequence_number: chunk.sequence_number,
            text: String::from_utf8_lossy(&chunk.content).trim().to_string(),
            is_interim: false,
        };
        Ok(stream::iter(vec![segment]).boxed())
    }

    async fn flush(&self) -> Result<SegmentStream> {
        Ok(stream::empty().boxed())
    }

    fn name(&self) -> &str {
        "echo"
    }
}
