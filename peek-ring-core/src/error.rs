//! Error types for ring construction.

use snafu::Snafu;

/// Invalid [`RingBuilder`](crate::RingBuilder) configuration.
///
/// The ring operations themselves never fail; only construction is
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BuildError {
    /// Segment size of zero.
    #[snafu(display("segment size must be > 0"))]
    ZeroSegmentSize,

    /// Segment size above the supported maximum.
    #[snafu(display("segment size {size} exceeds maximum ({max})"))]
    SegmentTooLarge {
        /// Requested size in bytes.
        size: usize,
        /// Largest accepted size in bytes.
        max: usize,
    },

    /// More warm spares requested than the pool may retain.
    #[snafu(display("cannot warm {warm} segments into a pool limited to {limit}"))]
    WarmExceedsPool {
        /// Requested spares.
        warm: usize,
        /// Pool limit.
        limit: usize,
    },
}
