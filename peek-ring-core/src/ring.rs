//! Growable byte ring with a peekable read side.
//!
//! # Layout
//!
//! ```text
//!  read-commit cursor                              write cursor
//!        │                                              │
//!        ▼                                              ▼
//!  ┌──────────────┐ next ┌──────────────┐ next ┌──────────────┐
//!  │ ····XXXXXXXX │ ───► │ XXXXXXXXXXXX │ ───► │ XXXXXX······ │
//!  └──────────────┘      └──────────────┘      └──────────────┘
//!        head                                        tail
//! ```
//!
//! Buffered bytes (`X`) are contiguous in chain order. The producer appends
//! at the tail, linking a new segment when the tail is full; the consumer
//! removes from the head and retires a segment once it has moved past its
//! last byte and the producer has linked a successor.
//!
//! # Ordering
//!
//! ```text
//! Producer: copy bytes -> link successor (Release) -> len += n (Release)
//! Consumer: len (Acquire) -> follow links (Acquire) -> copy bytes -> len -= n
//! ```
//!
//! The buffered length is the only value both sides read. A consumer that
//! sees a length also sees every byte and every link that produced it.

use core::{mem, ptr::NonNull};

use tracing::{debug, trace};

use crate::{
    builder::RingBuilder,
    index::{AtomicLen, Cursor, CursorCell},
    pool::SegmentPool,
    segment::Segment,
    stats::{Counter, RingStats, SegmentCounters},
    traits::RingInfo,
};

/// Default capacity of a regular segment (16 KiB).
pub const DEFAULT_SEGMENT_SIZE: usize = 16 * 1024;

/// Largest accepted segment size (1 GiB).
pub const MAX_SEGMENT_SIZE: usize = 1 << 30;

/// Default number of retired segments kept for reuse.
pub(crate) const DEFAULT_POOL_LIMIT: usize = 4;

/// Target cache-line size in bytes.
const CACHE_LINE: usize = 64;

/// Padding to fill the consumer cache line (reader + bytes_read + pad).
const READER_PAD: usize =
    CACHE_LINE.saturating_sub(size_of::<CursorCell>() + size_of::<Counter>());

/// Padding to fill the producer cache line (writer + bytes_written + pad).
const WRITER_PAD: usize =
    CACHE_LINE.saturating_sub(size_of::<CursorCell>() + size_of::<Counter>());

/// Padding to keep the shared length on its own cache line.
const LEN_PAD: usize = CACHE_LINE.saturating_sub(size_of::<AtomicLen>());

/// Growable single-producer/single-consumer byte stream buffer.
///
/// The producer appends with [`write`](Self::write); the consumer inspects
/// with [`peek`](Self::peek) and removes with [`read`](Self::read). Writes
/// never block and never fail: when the tail segment is full a new one is
/// linked. Reads and peeks never block: they return what is buffered now.
///
/// Used from one thread, call the methods directly. To connect two threads,
/// [`split`](Self::split) the ring into a [`RingWriter`](crate::RingWriter)
/// and a [`RingReader`](crate::RingReader).
///
/// There is no capacity limit. A producer that must bound memory polls
/// [`size`](Self::size) and backs off.
///
/// # Example
///
/// ```
/// use peek_ring_core::Ring;
///
/// let mut ring = Ring::new();
/// ring.write(b"hello world");
///
/// let mut buf = [0u8; 5];
/// assert_eq!(ring.peek(&mut buf, 5), 5);
/// assert_eq!(&buf, b"hello");
///
/// // Commit the inspected bytes without copying them again.
/// assert_eq!(ring.read(None, 5), 5);
/// assert_eq!(ring.size(), 6);
/// ```
#[repr(C, align(64))]
pub struct Ring {
    // ── Consumer cache line ──────────────────────────────────────────
    reader: CursorCell,
    bytes_read: Counter,
    _pad_reader: [u8; READER_PAD],

    // ── Producer cache line ──────────────────────────────────────────
    writer: CursorCell,
    bytes_written: Counter,
    _pad_writer: [u8; WRITER_PAD],

    // ── Shared cache line ────────────────────────────────────────────
    len: AtomicLen,
    _pad_len: [u8; LEN_PAD],

    // ── Cold fields ──────────────────────────────────────────────────
    segment_size: usize,
    pub(crate) pool: SegmentPool,
    segments: SegmentCounters,
}

// SAFETY: the ring owns its segment chain. Mutation goes through `&mut self`
// or through a handle that is the unique owner of its side (`RingWriter`
// owns `writer`, `RingReader` owns `reader`). Shared `&self` access only
// reads the consumer cursor and the atomics.
unsafe impl Send for Ring {}
unsafe impl Sync for Ring {}

// ── Constructors ─────────────────────────────────────────────────────

impl Ring {
    /// Create a builder for configuring a [`Ring`].
    ///
    /// # Example
    ///
    /// ```
    /// use peek_ring_core::Ring;
    ///
    /// let ring = Ring::builder()
    ///     .segment_size(1024)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(ring.segment_size(), 1024);
    /// ```
    pub fn builder() -> RingBuilder {
        RingBuilder::new()
    }

    /// Create an empty ring with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_SEGMENT_SIZE, DEFAULT_POOL_LIMIT)
    }

    /// Configuration is validated by [`RingBuilder::build`].
    pub(crate) fn with_config(segment_size: usize, pool_limit: usize) -> Self {
        let first = NonNull::from(Box::leak(Segment::new(segment_size)));
        let segments = SegmentCounters::new();
        segments.allocated.bump(1);
        debug!(segment_size, pool_limit, "ring created");

        Self {
            reader: CursorCell::new(Cursor::start(first)),
            bytes_read: Counter::new(),
            _pad_reader: [0; READER_PAD],
            writer: CursorCell::new(Cursor::start(first)),
            bytes_written: Counter::new(),
            _pad_writer: [0; WRITER_PAD],
            len: AtomicLen::new(0),
            _pad_len: [0; LEN_PAD],
            segment_size,
            pool: SegmentPool::new(segment_size, pool_limit),
            segments,
        }
    }
}

// ── Producer side ────────────────────────────────────────────────────

impl Ring {
    /// Append `data` at the write cursor and publish it.
    ///
    /// # Safety
    /// Caller must be the only producer, and calls must not overlap.
    pub(crate) unsafe fn produce(&self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        // SAFETY: caller is the single producer; nobody else touches `writer`.
        let cursor = unsafe { self.writer.get_mut_unchecked() };
        // SAFETY: the consumer never retires the tail before a successor is
        // linked, and only this call links one.
        let tail = unsafe { cursor.segment.as_ref() };

        let room = tail.capacity() - cursor.offset;
        let (front, rest) = data.split_at(room.min(data.len()));
        if !front.is_empty() {
            // SAFETY: `[offset, offset + front.len())` is inside the tail and
            // past everything published so far.
            unsafe { tail.write_at(cursor.offset, front) };
            cursor.offset += front.len();
        }

        if !rest.is_empty() {
            let next = self.grow(rest.len());
            // SAFETY: `next` is not linked yet, so it is private to us.
            unsafe { next.write_at(0, rest) };
            // Last access to `tail`: after this the consumer may retire it.
            cursor.segment = tail.link(next);
            cursor.offset = rest.len();
        }

        self.bytes_written.bump(data.len());
        self.len.publish(data.len());
    }

    /// A segment able to hold at least `min` bytes.
    fn grow(&self, min: usize) -> Box<Segment> {
        if min > self.segment_size {
            self.segments.allocated.bump(1);
            debug!(capacity = min, "allocated oversized segment");
            return Segment::new(min);
        }
        if let Some(segment) = self.pool.steal() {
            self.segments.reused.bump(1);
            trace!(capacity = segment.capacity(), "reused pooled segment");
            return segment;
        }
        self.segments.allocated.bump(1);
        trace!(capacity = self.segment_size, "allocated segment");
        Segment::new(self.segment_size)
    }
}

// ── Consumer side ────────────────────────────────────────────────────

impl Ring {
    /// Remove up to `max` bytes, copying them into `out` if given.
    ///
    /// # Safety
    /// Caller must be the only consumer, and calls must not overlap with
    /// any other consumer-side call.
    pub(crate) unsafe fn remove(&self, out: Option<&mut [u8]>, max: usize) -> usize {
        let mut count = max.min(self.len.load());
        if let Some(buf) = out {
            count = count.min(buf.len());
            // SAFETY: consumer side; `count` bytes are published.
            unsafe { self.copy_out(&mut buf[..count]) };
        }
        if count > 0 {
            // SAFETY: consumer side; `count` bytes are published.
            unsafe { self.advance(count) };
        }
        count
    }

    /// Copy up to `max` bytes from the read-commit position without
    /// removing them.
    ///
    /// # Safety
    /// Caller must be on the consumer side with no overlapping `remove`.
    pub(crate) unsafe fn inspect(&self, out: &mut [u8], max: usize) -> usize {
        let count = max.min(out.len()).min(self.len.load());
        // SAFETY: consumer side; `count` bytes are published.
        unsafe { self.copy_out(&mut out[..count]) };
        count
    }

    /// Longest contiguous run of buffered bytes at the read-commit position.
    ///
    /// # Safety
    /// Caller must be on the consumer side, and must not advance the reader
    /// while the returned slice is alive.
    pub(crate) unsafe fn front_chunk(&self) -> &[u8] {
        let avail = self.len.load();
        if avail == 0 {
            return &[];
        }
        // SAFETY: consumer side.
        let Cursor { segment, mut offset } = unsafe { self.reader.get() };
        // SAFETY: segments from the read-commit cursor on stay alive until
        // the consumer retires them.
        let mut seg = unsafe { segment.as_ref() };
        if offset == seg.capacity() {
            let Some(next) = seg.next() else {
                unreachable!("{avail} bytes published past the end of the chain");
            };
            // SAFETY: as above.
            seg = unsafe { next.as_ref() };
            offset = 0;
        }
        let n = (seg.capacity() - offset).min(avail);
        // SAFETY: the `n` bytes are published; retiring `seg` needs a
        // consumer-side `&mut` that the caller contract rules out.
        unsafe { seg.slice(offset, n) }
    }

    /// Copy `out.len()` bytes from the read-commit position. Moves nothing.
    ///
    /// # Safety
    /// Consumer side only; `out.len()` must not exceed the published length.
    unsafe fn copy_out(&self, out: &mut [u8]) {
        // SAFETY: consumer side.
        let Cursor {
            mut segment,
            mut offset,
        } = unsafe { self.reader.get() };

        let mut copied = 0;
        while copied < out.len() {
            // SAFETY: live until retired by the consumer, which is us.
            let seg = unsafe { segment.as_ref() };
            if offset == seg.capacity() {
                let Some(next) = seg.next() else {
                    unreachable!("published bytes past the end of the chain");
                };
                segment = next;
                offset = 0;
                continue;
            }
            let n = (seg.capacity() - offset).min(out.len() - copied);
            // SAFETY: the range is published and inside `seg`.
            unsafe { seg.read_at(offset, &mut out[copied..copied + n]) };
            copied += n;
            offset += n;
        }
    }

    /// Move the read-commit cursor forward by `n` bytes, retiring every
    /// segment it leaves behind. The only place segments are released.
    ///
    /// # Safety
    /// Consumer side only; `n` must not exceed the published length.
    unsafe fn advance(&self, n: usize) {
        // SAFETY: consumer side; no other reference to `reader` is live.
        let cursor = unsafe { self.reader.get_mut_unchecked() };

        let mut remaining = n;
        loop {
            // SAFETY: live until retired below.
            let seg = unsafe { cursor.segment.as_ref() };
            if cursor.offset == seg.capacity() {
                // No successor yet: the producer may still own this segment.
                let Some(next) = seg.next() else { break };
                let spent = mem::replace(&mut cursor.segment, next);
                cursor.offset = 0;
                // SAFETY: we moved past `spent` and the producer released it
                // by linking `next`.
                unsafe { self.retire(spent) };
                continue;
            }
            if remaining == 0 {
                break;
            }
            let step = (seg.capacity() - cursor.offset).min(remaining);
            cursor.offset += step;
            remaining -= step;
        }
        debug_assert_eq!(remaining, 0, "advanced past the end of the chain");

        self.bytes_read.bump(n);
        self.len.retire(n);
    }

    /// # Safety
    /// `segment` must be unreachable from both cursors and came from
    /// `Box::leak`.
    unsafe fn retire(&self, segment: NonNull<Segment>) {
        // SAFETY: caller contract.
        let segment = unsafe { Box::from_raw(segment.as_ptr()) };
        self.segments.retired.bump(1);
        if let Some(segment) = self.pool.give_back(segment) {
            trace!(capacity = segment.capacity(), "freed retired segment");
        }
    }
}

// ── Public API (exclusive access) ────────────────────────────────────

impl Ring {
    /// Append all of `data` to the stream.
    ///
    /// Never blocks, never truncates. Allocates a segment if the tail lacks
    /// room.
    #[inline]
    pub fn write(&mut self, data: &[u8]) {
        // SAFETY: `&mut self` makes this the only producer.
        unsafe { self.produce(data) }
    }

    /// Remove up to `max` bytes from the front of the stream.
    ///
    /// With `Some(buf)` the bytes are copied into `buf` first and the count
    /// is also clamped to `buf.len()`. With `None` they are discarded, which
    /// commits bytes already inspected with [`peek`](Self::peek).
    ///
    /// Returns the number of bytes removed; `0` when the ring is empty.
    #[inline]
    pub fn read(&mut self, out: Option<&mut [u8]>, max: usize) -> usize {
        // SAFETY: `&mut self` makes this the only consumer.
        unsafe { self.remove(out, max) }
    }

    /// Copy up to `max` bytes from the front of the stream into `out`
    /// without removing them.
    ///
    /// Returns the number of bytes copied: `max`, `out.len()` or the
    /// buffered length, whichever is smallest.
    #[inline]
    pub fn peek(&self, out: &mut [u8], max: usize) -> usize {
        // SAFETY: consumer-side mutation needs `&mut self`, so none overlaps.
        unsafe { self.inspect(out, max) }
    }

    /// Number of bytes buffered and not yet removed.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.len.load()
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
    ///
    /// Empty only when the ring is empty. Bytes past the first segment
    /// boundary are reached after [`skip`](Self::skip)ping this chunk.
    #[inline]
    #[must_use]
    pub fn chunk(&self) -> &[u8] {
        // SAFETY: advancing needs `&mut self`, which the borrow rules out.
        unsafe { self.front_chunk() }
    }

    /// Number of bytes buffered. Alias for [`size`](Self::size).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// True if no bytes are buffered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Default capacity of a regular segment.
    #[inline]
    #[must_use]
    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    /// Maximum number of spare segments retained for reuse.
    #[inline]
    #[must_use]
    pub fn pool_limit(&self) -> usize {
        self.pool.limit()
    }

    /// Snapshot of lifetime counters.
    #[must_use]
    pub fn stats(&self) -> RingStats {
        RingStats {
            bytes_written: self.bytes_written.get(),
            bytes_read: self.bytes_read.get(),
            segments_allocated: self.segments.allocated.get(),
            segments_reused: self.segments.reused.get(),
            segments_retired: self.segments.retired.get(),
            pooled: self.pool.len(),
        }
    }
}

// ── Trait impls ──────────────────────────────────────────────────────

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}

impl RingInfo for Ring {
    #[inline]
    fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    fn segment_size(&self) -> usize {
        self.segment_size
    }
}

impl core::fmt::Debug for Ring {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ring")
            .field("size", &self.size())
            .field("segment_size", &self.segment_size)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Frees the whole chain, from the read-commit cursor to the tail. Pooled
/// spares are dropped with the pool.
impl Drop for Ring {
    fn drop(&mut self) {
        let mut next = Some(self.reader.get_mut().segment);
        let mut freed = 0usize;
        while let Some(segment) = next {
            // SAFETY: `&mut self` means neither side is running. Every segment
            // reachable from the read-commit cursor belongs to the chain and
            // was leaked from a `Box`.
            let segment = unsafe { Box::from_raw(segment.as_ptr()) };
            next = segment.next();
            freed += 1;
        }
        debug!(segments = freed, buffered = self.len.load(), "ring dropped");
    }
}

// ── Layout test ──────────────────────────────────────────────────────
