//! Core implementation for `peek_ring`.
//!
//! A [`Ring`] is an unbounded FIFO of bytes built from a chain of
//! fixed-size segments. One producer appends; one consumer peeks at and
//! removes bytes from the front. The only state the two sides share is an
//! atomic buffered length, so neither side ever waits on the other.

#![warn(missing_docs)]

mod builder;
mod error;
mod handles;
mod index;
mod io;
mod pool;
mod ring;
mod segment;
mod stats;
mod sync;
mod traits;


pub use builder::RingBuilder;
pub use error::BuildError;
pub use handles::{RingReader, RingWriter};
pub use ring::{DEFAULT_SEGMENT_SIZE, MAX_SEGMENT_SIZE, Ring};
pub use stats::RingStats;
pub use traits::RingInfo;
