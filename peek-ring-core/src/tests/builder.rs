use crate::{BuildError, MAX_SEGMENT_SIZE, Ring, RingBuilder};

#[test]
fn defaults() {
    let ring = Ring::builder().build().unwrap();
    assert_eq!(ring.segment_size(), crate::DEFAULT_SEGMENT_SIZE);
    assert_eq!(ring.pool_limit(), 4);
    assert_eq!(ring.stats().pooled, 0);
}

#[test]
fn default_builder_matches_ring_builder() {
    let a = RingBuilder::default().build().unwrap();
    let b = Ring::builder().build().unwrap();
    assert_eq!(a.segment_size(), b.segment_size());
    assert_eq!(a.pool_limit(), b.pool_limit());
}

#[test]
fn custom_segment_size() {
    let ring = Ring::builder().segment_size(100).build().unwrap();
    assert_eq!(ring.segment_size(), 100);
}

#[test]
fn zero_segment_size_rejected() {
    let err = Ring::builder().segment_size(0).build().unwrap_err();
    assert_eq!(err, BuildError::ZeroSegmentSize);
    assert_eq!(err.to_string(), "segment size must be > 0");
}

#[test]
fn oversized_segment_size_rejected() {
    let err = Ring::builder()
        .segment_size(MAX_SEGMENT_SIZE + 1)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::SegmentTooLarge {
            size: MAX_SEGMENT_SIZE + 1,
            max: MAX_SEGMENT_SIZE,
        }
    );
    assert!(err.to_string().contains("exceeds maximum"));
}

#[test]
fn warm_fills_pool() {
    let ring = Ring::builder()
        .segment_size(64)
        .pool_limit(8)
        .warm(3)
        .build()
        .unwrap();
    let stats = ring.stats();
    assert_eq!(stats.pooled, 3);
    assert_eq!(stats.segments_allocated, 1);
}

#[test]
fn warm_beyond_pool_limit_rejected() {
    let err = Ring::builder().pool_limit(2).warm(3).build().unwrap_err();
    assert_eq!(err, BuildError::WarmExceedsPool { warm: 3, limit: 2 });
    assert_eq!(
        err.to_string(),
        "cannot warm 3 segments into a pool limited to 2"
    );
}

#[test]
fn cold_overrides_warm() {
    let ring = Ring::builder().warm(2).cold().build().unwrap();
    assert_eq!(ring.stats().pooled, 0);
}

#[test]
fn builder_is_reusable_via_clone() {
    let builder = Ring::builder().segment_size(32).pool_limit(1);
    let a = builder.clone().build().unwrap();
    let b = builder.build().unwrap();
    assert_eq!(a.segment_size(), 32);
    assert_eq!(b.pool_limit(), 1);
}
