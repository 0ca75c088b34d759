//! A growable single-producer/single-consumer byte ring with
//! non-destructive peek.

pub use peek_ring_core::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Ring, RingBuilder, RingInfo, RingReader, RingStats, RingWriter};
}
