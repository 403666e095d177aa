pub mod collab;
pub mod config;
pub mod server;
pub mod service;
pub mod session;
pub mod wire;

pub use collab::{
    Collaborators, EchoTranscriber, LeadSummarizer, MeetingMetadata, MeetingRecord,
    MemoryMetadataStore, MetadataPatch, MetadataStore, Summarizer, Transcriber,
};
pub use config::{Config, StreamConfig};
pub use server::{StreamHandle, StreamServer};
pub use service::MeetingService;
pub use session::{
    AudioChunk, ClientEvent, ErrorCode, ImportanceMarker, ServerEvent, SessionMachine,
    SessionRegistry, SessionState, TranscriptionSegment,
};
pub use wire::{ClientMessage, ServerMessage, StreamCodec};
