//! Lifetime counters.

use crate::sync::{AtomicUsize, Ordering};

/// Monotonic relaxed counter. Advisory only; never used for synchronization.
#[repr(transparent)]
pub(crate) struct Counter(AtomicUsize);

impl Counter {
    #[inline]
    pub(crate) fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    #[inline]
    pub(crate) fn bump(&self, n: usize) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Segment lifecycle counters. Bumped only on segment boundaries, so they
/// live off the hot cache lines.
pub(crate) struct SegmentCounters {
    pub(crate) allocated: Counter,
    pub(crate) reused: Counter,
    pub(crate) retired: Counter,
}

impl SegmentCounters {
    pub(crate) fn new() -> Self {
        Self {
            allocated: Counter::new(),
            reused: Counter::new(),
            retired: Counter::new(),
        }
    }
}

/// Snapshot of a ring's lifetime counters.
///
/// Like [`Ring::size`](crate::Ring::size), the values are advisory when the
/// ring is in use from two threads: each field is read independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RingStats {
    /// Total bytes appended by `write`.
    pub bytes_written: usize,
    /// Total bytes removed by `read` (copied out or discarded).
    pub bytes_read: usize,
    /// Segments freshly allocated for the chain, including the initial one.
    /// Spares pre-allocated by [`RingBuilder::warm`](crate::RingBuilder::warm)
    /// are not counted until they are reused.
    pub segments_allocated: usize,
    /// Segments taken from the spare pool instead of the allocator.
    pub segments_reused: usize,
    /// Segments released by the consumer (pooled or freed).
    pub segments_retired: usize,
    /// Spare segments currently held by the pool.
    pub pooled: usize,
}

impl RingStats {
    /// Segments currently linked into the chain.
    #[must_use]
    pub fn live_segments(&self) -> usize {
        (self.segments_allocated + self.segments_reused).saturating_sub(self.segments_retired)
    }
}
