//! Spare segments recycled from the consumer back to the producer.
//!
//! ```text
//! Producer                                   Consumer
//!    │ needs room                               │ head segment exhausted
//!    ▼                                          ▼
//!  steal ◄──── [ spare | spare | ... ] ◄──── give back
//!    │ (pool empty or busy)                     │ (pool full, busy, or oversized)
//!    ▼                                          ▼
//!  allocate                                    free
//! ```
//!
//! Both sides only ever `try_lock`: a contended pool never blocks a write or
//! a read, it just costs one allocation or one free.

use tracing::trace;

use crate::{segment::Segment, sync::Mutex};

/// Bounded stack of default-size spare segments.
pub(crate) struct SegmentPool {
    spares: Mutex<Vec<Box<Segment>>>,
    segment_size: usize,
    limit: usize,
}

impl SegmentPool {
    pub(crate) fn new(segment_size: usize, limit: usize) -> Self {
        Self {
            spares: Mutex::new(Vec::with_capacity(limit)),
            segment_size,
            limit,
        }
    }

    /// Pre-allocate `count` spares (clamped to the pool limit).
    pub(crate) fn warm(&self, count: usize) {
        let count = count.min(self.limit);
        let mut spares = self.spares.lock();
        while spares.len() < count {
            spares.push(Segment::new(self.segment_size));
        }
        trace!(count, segment_size = self.segment_size, "warmed segment pool");
    }

    /// Steal a spare segment, if one is available without waiting.
    #[inline]
    pub(crate) fn steal(&self) -> Option<Box<Segment>> {
        self.spares.try_lock()?.pop()
    }

    /// Offer a retired segment back to the pool.
    ///
    /// Returns the segment if the pool does not take it (oversized, full, or
    /// contended); the caller then drops it.
    #[inline]
    pub(crate) fn give_back(&self, mut segment: Box<Segment>) -> Option<Box<Segment>> {
        if segment.capacity() != self.segment_size || self.limit == 0 {
            return Some(segment);
        }
        let Some(mut spares) = self.spares.try_lock() else {
            return Some(segment);
        };
        if spares.len() >= self.limit {
            return Some(segment);
        }
        segment.unlink();
        spares.push(segment);
        None
    }

    /// Number of spares currently held.
    pub(crate) fn len(&self) -> usize {
        self.spares.lock().len()
    }

    #[inline]
    pub(crate) fn limit(&self) -> usize {
        self.limit
    }
}
