//! Streaming session core
//!
//! One session per stream connection, from setup to close:
//! - `SessionMachine`: lifecycle, message legality, event routing, ordered
//!   outbound emission
//! - `ReorderBuffer`: audio reassembly from out-of-order or gapped chunks
//! - `MarkerLedger`: insertion-ordered importance marker log
//! - `SessionRegistry`: process-level meeting id uniqueness
//!
//! Sessions are isolated: all per-session state is owned by that session's
//! machine task; the registry is the only state shared across sessions.

mod events;
mod ledger;
mod machine;
mod registry;
mod reorder;
mod state;

pub use events::{
    AudioChunk, ClientEvent, ErrorCode, ImportanceMarker, ServerEvent, SetupRequest,
    TranscriptionSegment,
};
pub use ledger::{LedgerEntry, MarkerLedger};
pub use machine::SessionMachine;
pub use registry::{MeetingBusy, MeetingClaim, SessionRegistry};
pub use reorder::{Accept, ReorderBuffer};
pub use state::SessionState;
