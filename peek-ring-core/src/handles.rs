//! Producer and consumer handles for a split [`Ring`].

use crate::{Ring, stats::RingStats, sync::Arc, traits::RingInfo};

impl Ring {
    /// Split into a writer and a reader for use from two threads.
    ///
    /// The writer can only write; the reader can only read and peek. Neither
    /// handle is `Clone`, and every mutating method takes `&mut self`, so the
    /// single-producer/single-consumer contract holds by construction.
    ///
    /// Both handles hold an `Arc` to the ring; it is freed when the last one
    /// is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use peek_ring_core::Ring;
    /// use std::thread;
    ///
    /// let (mut writer, mut reader) = Ring::new().split();
    ///
    /// let t = thread::spawn(move || {
    ///     for i in 0..100u8 {
    ///         writer.write(&[i]);
    ///     }
    /// });
    /// t.join().unwrap();
    ///
    /// let mut buf = [0u8; 100];
    /// assert_eq!(reader.read(Some(&mut buf), 100), 100);
    /// assert_eq!(buf[99], 99);
    /// ```
    pub fn split(self) -> (RingWriter, RingReader) {
        let ring = Arc::new(self);
        (
            RingWriter {
                ring: Arc::clone(&ring),
            },
            RingReader { ring },
        )
    }
}

/// Producer handle for a split [`Ring`]. Can only write.
///
/// Created by [`Ring::split()`]. Not `Clone`: only one producer is permitted
/// per ring.
pub struct RingWriter {
    ring: Arc<Ring>,
}

impl RingWriter {
    /// Append all of `data` to the stream. See [`Ring::write`].
    #[inline]
    pub fn write(&mut self, data: &[u8]) {
        // SAFETY: the writer is the ring's only producer handle and `&mut self`
        // serializes its calls.
        unsafe { self.ring.produce(data) }
    }

    /// Bytes currently buffered. Use this to throttle the producer.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.ring.size()
    }

    /// Default capacity of a regular segment.
    #[inline]
    #[must_use]
    pub fn segment_size(&self) -> usize {
        self.ring.segment_size()
    }

    /// Snapshot of lifetime counters.
    #[must_use]
    pub fn stats(&self) -> RingStats {
        self.ring.stats()
    }
}

/// Consumer handle for a split [`Ring`]. Can only read and peek.
///
/// Created by [`Ring::split()`]. Not `Clone`: only one consumer is permitted
/// per ring.
pub struct RingReader {
    ring: Arc<Ring>,
}

impl RingReader {
    /// Remove up to `max` bytes, copying them into `out` if given.
    /// See [`Ring::read`].
    #[inline]
    pub fn read(&mut self, out: Option<&mut [u8]>, max: usize) -> usize {
        // SAFETY: the reader is the ring's only consumer handle and `&mut self`
        // excludes any overlapping peek or chunk borrow.
        unsafe { self.ring.remove(out, max) }
    }

    /// Copy up to `max` bytes without removing them. See [`Ring::peek`].
    #[inline]
    pub fn peek(&self, out: &mut [u8], max: usize) -> usize {
        // SAFETY: consumer-side mutation needs `&mut self`, so none overlaps.
        unsafe { self.ring.inspect(out, max) }
    }

    /// Bytes currently buffered.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.ring.size()
    }

    /// Remove bytes into `out` until it is full or the ring is empty.
    #[inline]
    pub fn read_into(&mut self, out: &mut [u8]) -> usize {
        let max = out.len();
        self.read(Some(out), max)
    }

    /// Discard up to `n` bytes. Same as `read(None, n)`.
    #[inline]
    pub fn skip(&mut self, n: usize) -> usize {
        self.read(None, n)
    }

    /// Copy bytes into `out` until it is full or the ring is exhausted,
    /// without removing them.
    #[inline]
    pub fn peek_into(&self, out: &mut [u8]) -> usize {
        let max = out.len();
        self.peek(out, max)
    }

    /// Zero-copy view of the buffered bytes in the head segment.
    /// See [`Ring::chunk`].
    #[inline]
    #[must_use]
    pub fn chunk(&self) -> &[u8] {
        // SAFETY: the slice borrows `self`; advancing needs `&mut self`.
        unsafe { self.ring.front_chunk() }
    }

    /// Default capacity of a regular segment.
    #[inline]
    #[must_use]
    pub fn segment_size(&self) -> usize {
        self.ring.segment_size()
    }

    /// Snapshot of lifetime counters.
    #[must_use]
    pub fn stats(&self) -> RingStats {
        self.ring.stats()
    }
}

impl RingInfo for RingWriter {
    #[inline]
    fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    fn segment_size(&self) -> usize {
        self.ring.segment_size()
    }
}

impl RingInfo for RingReader {
    #[inline]
    fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    fn segment_size(&self) -> usize {
        self.ring.segment_size()
    }
}

impl core::fmt::Debug for RingWriter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RingWriter").field("ring", &*self.ring).finish()
    }
}

impl core::fmt::Debug for RingReader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RingReader").field("ring", &*self.ring).finish()
    }
}
