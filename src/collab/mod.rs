//! External collaborator boundaries
//!
//! The stream core depends on three services it does not implement:
//! speech-to-text, summarization, and meeting metadata persistence. Each is
//! a trait here, plus the relay/trigger plumbing that republishes their
//! results onto the outbound channel, plus deterministic stubs used by the
//! demo binary and tests.

mod store;
mod summarize;
mod transcribe;

pub use store::{
    MeetingMetadata, MeetingRecord, MemoryMetadataStore, MetadataPatch, MetadataStore,
};
pub use summarize::{LeadSummarizer, SummarizationTrigger, Summarizer};
pub use transcribe::{EchoTranscriber, SegmentStream, Transcriber, TranscriptionRelay};

use std::sync::Arc;

/// Bundle of the three collaborators a session needs.
#[derive(Clone)]
pub struct Collaborators {
    pub transcriber: Arc<dyn Transcriber>,
    pub summarizer: Arc<dyn Summarizer>,
    pub store: Arc<dyn MetadataStore>,
}

impl Collaborators {
    /// All-stub bundle for wiring tests and the demo entrypoint.
    pub fn stub() -> Self {
        Self {
            transcriber: Arc::new(EchoTranscriber),
            summarizer: Arc::new(LeadSummarizer::default()),
            store: Arc::new(MemoryMetadataStore::new()),
        }
    }
}
