//! Fixed-capacity byte blocks linked into the ring's segment chain.
//!
//! A segment is written only by the producer and only at offsets that have
//! not been published yet; the consumer only reads offsets that have been
//! published through the ring's buffered length. The two sides therefore
//! never touch the same byte concurrently, which is why the byte region is
//! accessed through raw pointers instead of `&mut [u8]`.
//!
//! The `next` link is the hand-off point between the two sides: the producer
//! stores it (Release) as its very last access to a full segment, and the
//! consumer retires a segment only after observing a non-null `next`
//! (Acquire).

use core::ptr::{self, NonNull};

use crate::sync::{AtomicPtr, Ordering};

/// One link of the segment chain.
pub(crate) struct Segment {
    data: NonNull<u8>,
    capacity: usize,
    next: AtomicPtr<Segment>,
}

// SAFETY: a segment owns its byte region exclusively. Concurrent access from
// producer and consumer is restricted to disjoint byte ranges (see module
// docs), and `next` is atomic.
unsafe impl Send for Segment {}
unsafe impl Sync for Segment {}

impl Segment {
    /// Allocate a zeroed segment of `capacity` bytes.
    ///
    /// Allocation failure aborts through the global allocator's handler;
    /// there is no fallible path.
    pub(crate) fn new(capacity: usize) -> Box<Self> {
        let bytes = vec![0u8; capacity].into_boxed_slice();
        let data = NonNull::from(Box::leak(bytes)).cast::<u8>();
        Box::new(Self {
            data,
            capacity,
            next: AtomicPtr::new(ptr::null_mut()),
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Successor in the chain, if the producer has linked one.
    #[inline]
    pub(crate) fn next(&self) -> Option<NonNull<Segment>> {
        NonNull::new(self.next.load(Ordering::Acquire))
    }

    /// Publish `next` as this segment's successor and give up ownership of it.
    ///
    /// Must be the producer's last access to `self`: once the link is
    /// visible the consumer may retire this segment at any time.
    #[inline]
    pub(crate) fn link(&self, next: Box<Segment>) -> NonNull<Segment> {
        let next = NonNull::from(Box::leak(next));
        debug_assert!(self.next.load(Ordering::Relaxed).is_null(), "segment linked twice");
        self.next.store(next.as_ptr(), Ordering::Release);
        next
    }

    /// Clear the successor link before the segment is reused.
    #[inline]
    pub(crate) fn unlink(&mut self) {
        self.next.store(ptr::null_mut(), Ordering::Relaxed);
    }

    /// Copy `src` into the segment at `offset`.
    ///
    /// # Safety
    /// Caller must be the producer, `offset + src.len() <= capacity`, and the
    /// target range must not have been published to the consumer.
    #[inline]
    pub(crate) unsafe fn write_at(&self, offset: usize, src: &[u8]) {
        debug_assert!(offset + src.len() <= self.capacity);
        // SAFETY: range is in bounds (caller contract) and unpublished, so no
        // reader aliases it. `src` is caller memory, never inside a segment.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.data.as_ptr().add(offset), src.len());
        }
    }

    /// Copy `dst.len()` bytes starting at `offset` into `dst`.
    ///
    /// # Safety
    /// `offset + dst.len() <= capacity` and the range must already be
    /// published (the producer no longer writes to it).
    #[inline]
    pub(crate) unsafe fn read_at(&self, offset: usize, dst: &mut [u8]) {
        debug_assert!(offset + dst.len() <= self.capacity);
        // SAFETY: published bytes are immutable until the segment is retired.
        unsafe {
            ptr::copy_nonoverlapping(self.data.as_ptr().add(offset), dst.as_mut_ptr(), dst.len());
        }
    }

    /// Borrow `len` published bytes starting at `offset`.
    ///
    /// # Safety
    /// Same as [`read_at`](Self::read_at); additionally the segment must not
    /// be retired while the returned slice is alive.
    #[inline]
    pub(crate) unsafe fn slice(&self, offset: usize, len: usize) -> &[u8] {
        debug_assert!(offset + len <= self.capacity);
        // SAFETY: see caller contract.
        unsafe { core::slice::from_raw_parts(self.data.as_ptr().add(offset), len) }
    }
}

impl Drop for Segment {
    fn drop(&mut self) {
        let bytes = ptr::slice_from_raw_parts_mut(self.data.as_ptr(), self.capacity);
        // SAFETY: `data` came from `Box::leak` of a boxed slice of exactly
        // `capacity` bytes in `new`, and is released only here.
        drop(unsafe { Box::from_raw(bytes) });
    }
}

impl core::fmt::Debug for Segment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Segment")
            .field("capacity", &self.capacity)
            .field("linked", &!self.next.load(Ordering::Relaxed).is_null())
            .finish()
    }
}
