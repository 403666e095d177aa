use super::events::AudioChunk;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Outcome of offering one chunk to the reorder buffer.
#[derive(Debug)]
pub enum Accept {
    /// In order: this chunk plus any now-contiguous buffered chunks, ready to
    /// forward.
    Ready(Vec<AudioChunk>),
    /// Sequence number already consumed or already held; payload dropped.
    /// Idempotent retransmission is expected on unreliable transports.
    Duplicate,
    /// Ahead of the stream; held until the gap below it fills.
    Buffered,
    /// The reorder window overflowed and the oldest gap was skipped. `ready`
    /// resumes past the gap; the caller reports one AUDIO_GAP error.
    GapSkipped {
        ready: Vec<AudioChunk>,
        skipped_from: u64,
        resumed_at: u64,
    },
}

/// Orders and deduplicates audio chunks by sequence number.
///
/// `next_expected` is initialized from the first sequence number seen. A
/// chunk more than `window` positions ahead of it declares the gap
/// unrecoverable: streaming resumes from the smallest buffered sequence
/// rather than stalling the session on a late packet.
#[derive(Debug)]
pub struct ReorderBuffer {
    next_expected: Option<u64>,
    pending: BTreeMap<u64, Vec<u8>>,
    window: u64,
}

impl ReorderBuffer {
    pub fn new(window: usize) -> Self {
        Self {
            next_expected: None,
            pending: BTreeMap::new(),
            window: window.max(1) as u64,
        }
    }

    pub fn next_expected(&self) -> Option<u64> {
        self.next_expected
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn accept(&mut self, sequence_number: u64, content: Vec<u8>) -> Accept {
        let next = *self.next_expected.get_or_insert(sequence_number);

        if sequence_number < next || self.pending.contains_key(&sequence_number) {
            debug!(sequence = sequence_number, "duplicate audio chunk dropped");
            return Accept::Duplicate;
        }

        if sequence_number == next {
            self.next_expected = Some(sequence_number + 1);
            let mut ready = vec![AudioChunk {
                sequence_number,
                content,
            }];
            ready.extend(self.drain_contiguous());
            return Accept::Ready(ready);
        }

        self.pending.insert(sequence_number, content);
        if sequence_number - next < self.window {
            debug!(
                sequence = sequence_number,
                expected = next,
                held = self.pending.len(),
                "out-of-order chunk buffered"
            );
            return Accept::Buffered;
        }

        // Window overflow: give up on the oldest gap and resume from the
        // smallest buffered sequence.
        let Some(&resumed_at) = self.pending.keys().next() else {
            return Accept::Buffered;
        };
        warn!(
            expected = next,
            resumed_at,
            window = self.window,
            "reorder window exceeded; skipping gap"
        );
        self.next_expected = Some(resumed_at);
        let ready = self.drain_contiguous();
        Accept::GapSkipped {
            ready,
            skipped_from: next,
            resumed_at,
        }
    }

    /// Flush everything still held, in sequence order, at end of input.
    /// Returns the chunks and whether an unfilled gap remained before them.
    pub fn drain_remaining(&mut self) -> (Vec<AudioChunk>, bool) {
        if self.pending.is_empty() {
            return (Vec::new(), false);
        }
        // Buffered chunks only exist above an unfilled gap; contiguous runs
        // are flushed as they form.
        let chunks = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(sequence_number, content)| AudioChunk {
                sequence_number,
                content,
            })
            .collect::<Vec<_>>();
        if let Some(last) = chunks.last() {
            self.next_expected = Some(last.sequence_number + 1);
        }
        (chunks, true)
    }

    fn drain_contiguous(&mut self) -> Vec<AudioChunk> {
        let mut flushed = Vec::new();
        let Some(mut next) = self.next_expected else {
            return flushed;
        };
        while let Some(content) = self.pending.remove(&next) {
            flushed.push(AudioChunk {
                sequence_number: next,
                content,
            });
            next += 1;
        }
        self.next_expected = Some(next);
        flushed
    }
}
