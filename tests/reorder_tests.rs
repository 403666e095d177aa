// Tests for audio chunk reassembly: ordering, deduplication, and bounded
// gap recovery.

use meeting_stream::session::{Accept, ReorderBuffer};

fn seqs(ready: &[meeting_stream::AudioChunk]) -> Vec<u64> {
    ready.iter().map(|c| c.sequence_number).collect()
}

#[test]
fn in_order_chunks_flush_immediately() {
    let mut buffer = ReorderBuffer::new(8);

    for seq in 0..3 {
        match buffer.accept(seq, vec![seq as u8]) {
            Accept::Ready(ready) => assert_eq!(seqs(&ready), vec![seq]),
            other => panic!("expected Ready for seq {seq}, got {other:?}"),
        }
    }
    assert_eq!(buffer.next_expected(), Some(3));
    assert_eq!(buffer.pending_len(), 0);
}

#[test]
fn first_sequence_seen_sets_baseline() {
    let mut buffer = ReorderBuffer::new(8);

    match buffer.accept(50, b"late start".to_vec()) {
        Accept::Ready(ready) => assert_eq!(seqs(&ready), vec![50]),
        other => panic!("expected Ready, got {other:?}"),
    }
    assert_eq!(buffer.next_expected(), Some(51));
}

#[test]
fn out_of_order_chunk_buffers_until_gap_fills() {
    let mut buffer = ReorderBuffer::new(8);

    assert!(matches!(buffer.accept(0, vec![0]), Accept::Ready(_)));
    assert!(matches!(buffer.accept(2, vec![2]), Accept::Buffered));
    assert_eq!(buffer.pending_len(), 1);

    // The missing chunk arrives: both flush, in order.
    match buffer.accept(1, vec![1]) {
        Accept::Ready(ready) => assert_eq!(seqs(&ready), vec![1, 2]),
        other => panic!("expected Ready, got {other:?}"),
    }
    assert_eq!(buffer.next_expected(), Some(3));
    assert_eq!(buffer.pending_len(), 0);
}

#[test]
fn duplicate_sequence_is_dropped() {
    let mut buffer = ReorderBuffer::new(8);

    assert!(matches!(buffer.accept(0, vec![0]), Accept::Ready(_)));
    assert!(matches!(buffer.accept(0, vec![0]), Accept::Duplicate));
    assert_eq!(buffer.next_expected(), Some(1));
}

#[test]
fn replay_of_buffered_sequence_is_dropped() {
    let mut buffer = ReorderBuffer::new(8);

    assert!(matches!(buffer.accept(0, vec![0]), Accept::Ready(_)));
    assert!(matches!(buffer.accept(3, vec![3]), Accept::Buffered));
    assert!(matches!(buffer.accept(3, vec![3]), Accept::Duplicate));
    assert_eq!(buffer.pending_len(), 1);
}

#[test]
fn window_overflow_skips_oldest_gap() {
    let mut buffer = ReorderBuffer::new(8);

    assert!(matches!(buffer.accept(0, vec![0]), Accept::Ready(_)));

    // Sequence 50 is far beyond the window: the gap 1..50 is abandoned.
    match buffer.accept(50, b"far ahead".to_vec()) {
        Accept::GapSkipped {
            ready,
            skipped_from,
            resumed_at,
        } => {
            assert_eq!(seqs(&ready), vec![50]);
            assert_eq!(skipped_from, 1);
            assert_eq!(resumed_at, 50);
        }
        other => panic!("expected GapSkipped, got {other:?}"),
    }

    // Streaming resumes past the gap.
    assert!(matches!(buffer.accept(51, vec![51]), Accept::Ready(_)));
    assert_eq!(buffer.next_expected(), Some(52));
}

#[test]
fn skip_flushes_contiguous_run_above_gap() {
    let mut buffer = ReorderBuffer::new(4);

    assert!(matches!(buffer.accept(0, vec![0]), Accept::Ready(_)));
    assert!(matches!(buffer.accept(2, vec![2]), Accept::Buffered));
    assert!(matches!(buffer.accept(3, vec![3]), Accept::Buffered));
    assert!(matches!(buffer.accept(4, vec![4]), Accept::Buffered));

    // Sequence 5 is window positions past the expected 1: skip the gap and
    // flush the whole buffered run.
    match buffer.accept(5, vec![5]) {
        Accept::GapSkipped {
            ready, resumed_at, ..
        } => {
            assert_eq!(seqs(&ready), vec![2, 3, 4, 5]);
            assert_eq!(resumed_at, 2);
        }
        other => panic!("expected GapSkipped, got {other:?}"),
    }
    assert_eq!(buffer.next_expected(), Some(6));
    assert_eq!(buffer.pending_len(), 0);
}

#[test]
fn drain_remaining_reports_unfilled_gap() {
    let mut buffer = ReorderBuffer::new(8);

    assert!(matches!(buffer.accept(0, vec![0]), Accept::Ready(_)));
    assert!(matches!(buffer.accept(2, vec![2]), Accept::Buffered));
    assert!(matches!(buffer.accept(4, vec![4]), Accept::Buffered));

    let (remaining, had_gap) = buffer.drain_remaining();
    assert!(had_gap);
    assert_eq!(seqs(&remaining), vec![2, 4]);
    assert_eq!(buffer.pending_len(), 0);
}

#[test]
fn drain_remaining_is_clean_when_nothing_is_held() {
    let mut buffer = ReorderBuffer::new(8);

    assert!(matches!(buffer.accept(0, vec![0]), Accept::Ready(_)));
    let (remaining, had_gap) = buffer.drain_remaining();
    assert!(!had_gap);
    assert!(remaining.is_empty());
}
