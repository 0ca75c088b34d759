//! Builder for configuring a [`Ring`].

use snafu::ensure;

use crate::{
    Ring,
    error::{BuildError, SegmentTooLargeSnafu, WarmExceedsPoolSnafu, ZeroSegmentSizeSnafu},
    ring::{DEFAULT_POOL_LIMIT, DEFAULT_SEGMENT_SIZE, MAX_SEGMENT_SIZE},
};

/// Builder for constructing a [`Ring`].
///
/// Created via [`Ring::builder()`]. Configure options with chained
/// methods, then call [`.build()`](Self::build) to construct the ring.
///
/// # Example
///
/// ```
/// use peek_ring_core::Ring;
///
/// // Defaults: 16 KiB segments, up to 4 spares, cold pool
/// let ring = Ring::builder().build().unwrap();
///
/// // Small segments, pool pre-filled with two spares
/// let ring = Ring::builder()
///     .segment_size(4096)
///     .pool_limit(8)
///     .warm(2)
///     .build()
///     .unwrap();
/// assert_eq!(ring.stats().pooled, 2);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct RingBuilder {
    segment_size: usize,
    pool_limit: usize,
    warm: usize,
}

impl RingBuilder {
    pub(crate) fn new() -> Self {
        Self {
            segment_size: DEFAULT_SEGMENT_SIZE,
            pool_limit: DEFAULT_POOL_LIMIT,
            warm: 0,
        }
    }

    /// Capacity in bytes of each regular segment.
    ///
    /// A single write larger than this gets one oversized segment sized to
    /// fit it; oversized segments are freed rather than pooled.
    pub fn segment_size(mut self, bytes: usize) -> Self {
        self.segment_size = bytes;
        self
    }

    /// Maximum number of retired segments kept for reuse. `0` disables
    /// pooling: every retired segment is freed.
    pub fn pool_limit(mut self, segments: usize) -> Self {
        self.pool_limit = segments;
        self
    }

    /// Pre-allocate `segments` spares so the first writes past the initial
    /// segment do not hit the allocator.
    pub fn warm(mut self, segments: usize) -> Self {
        self.warm = segments;
        self
    }

    /// Do not pre-allocate spares (the default).
    pub fn cold(mut self) -> Self {
        self.warm = 0;
        self
    }

    /// Build the [`Ring`].
    ///
    /// # Errors
    /// Returns [`BuildError`] if the segment size is zero or above
    /// [`MAX_SEGMENT_SIZE`], or if more spares are warmed than the pool
    /// may hold.
    pub fn build(self) -> Result<Ring, BuildError> {
        ensure!(self.segment_size > 0, ZeroSegmentSizeSnafu);
        ensure!(
            self.segment_size <= MAX_SEGMENT_SIZE,
            SegmentTooLargeSnafu {
                size: self.segment_size,
                max: MAX_SEGMENT_SIZE,
            }
        );
        ensure!(
            self.warm <= self.pool_limit,
            WarmExceedsPoolSnafu {
                warm: self.warm,
                limit: self.pool_limit,
            }
        );

        let ring = Ring::with_config(self.segment_size, self.pool_limit);
        if self.warm > 0 {
            ring.pool.warm(self.warm);
        }
        Ok(ring)
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
