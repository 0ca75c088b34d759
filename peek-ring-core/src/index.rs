//! Cursor state and the shared buffered-length counter.

use core::{cell::UnsafeCell, ptr::NonNull};

use crate::segment::Segment;

// ── Cursor / CursorCell ───────────────────────────────────────────────

/// Position in the segment chain: a segment plus a byte offset inside it.
///
/// `offset == segment.capacity()` is a valid position meaning "at the end of
/// this segment"; the next byte, once written, lives at offset 0 of the
/// successor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor {
    pub(crate) segment: NonNull<Segment>,
    pub(crate) offset: usize,
}

impl Cursor {
    #[inline]
    pub(crate) const fn start(segment: NonNull<Segment>) -> Self {
        Self { segment, offset: 0 }
    }
}

/// Interior mutable cell owned by exactly one side (producer or consumer).
#[repr(transparent)]
pub(crate) struct CursorCell(UnsafeCell<Cursor>);

impl CursorCell {
    #[inline]
    pub(crate) const fn new(cursor: Cursor) -> Self {
        Self(UnsafeCell::new(cursor))
    }

    /// # Safety
    /// Caller must be the owning side and hold no other reference to the cell.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn get_mut_unchecked(&self) -> &mut Cursor {
        unsafe { &mut *self.0.get() }
    }

    /// # Safety
    /// Caller must be the owning side, with no live `&mut` from
    /// [`get_mut_unchecked`](Self::get_mut_unchecked).
    #[inline]
    pub(crate) unsafe fn get(&self) -> Cursor {
        unsafe { *self.0.get() }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self) -> &mut Cursor {
        self.0.get_mut()
    }
}

// ── AtomicLen ─────────────────────────────────────────────────────────

mod atomic {
    use crate::sync::{AtomicUsize, Ordering};

    /// Buffered length, the only synchronization point between producer and
    /// consumer.
    ///
    /// ```text
    /// producer copies bytes, then Release-adds n  ->  consumer Acquire-loads, then reads bytes
    /// ```
    ///
    /// The consumer's subtraction is an RMW, so it continues the release
    /// sequence started by the producer's addition; a load that observes the
    /// post-subtraction value still synchronizes with every earlier publish.
    #[repr(transparent)]
    pub(crate) struct AtomicLen(AtomicUsize);

    impl AtomicLen {
        #[inline]
        pub(crate) fn new(val: usize) -> Self {
            Self(AtomicUsize::new(val))
        }

        /// Load with Acquire ordering.
        #[inline]
        pub(crate) fn load(&self) -> usize {
            self.0.load(Ordering::Acquire)
        }

        /// Make `n` freshly written bytes visible to the consumer.
        #[inline]
        pub(crate) fn publish(&self, n: usize) {
            self.0.fetch_add(n, Ordering::Release);
        }

        /// Remove `n` consumed bytes.
        #[inline]
        pub(crate) fn retire(&self, n: usize) {
            let prev = self.0.fetch_sub(n, Ordering::Release);
            debug_assert!(prev >= n, "retired {n} bytes with only {prev} buffered");
        }
    }
}

pub(crate) use atomic::AtomicLen;
