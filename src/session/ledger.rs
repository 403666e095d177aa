use super::events::ImportanceMarker;
use chrono::{DateTime, Utc};

/// One recorded marker with its arrival timestamp.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub marker: ImportanceMarker,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only log of importance markers, readable in insertion order.
///
/// Markers do not participate in audio sequencing; they are recorded in
/// arrival order regardless of how the audio stream is interleaved.
#[derive(Debug, Default)]
pub struct MarkerLedger {
    entries: Vec<LedgerEntry>,
}

impl MarkerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker; returns its zero-based position in the ledger.
    pub fn append(&mut self, marker: ImportanceMarker) -> usize {
        self.entries.push(LedgerEntry {
            marker,
            recorded_at: Utc::now(),
        });
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
