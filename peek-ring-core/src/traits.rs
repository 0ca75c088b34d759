/// Size information shared by a ring and both of its handles.
///
/// See [`Ring`](crate::Ring) for the primary implementation.
pub trait RingInfo {
    /// Returns the number of bytes currently buffered.
    ///
    /// Advisory when the ring is shared between two threads: the other side
    /// may have written or removed bytes by the time the caller acts on it.
    fn len(&self) -> usize;

    /// Returns the default capacity of a newly allocated segment.
    fn segment_size(&self) -> usize;

    /// Returns `true` if no bytes are buffered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
