use crate::{Ring, RingInfo};

/// Ring with tiny segments so short writes cross boundaries.
fn small(segment_size: usize) -> Ring {
    Ring::builder().segment_size(segment_size).build().unwrap()
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i & 0xff) as u8).collect()
}

#[test]
fn new_ring_is_empty() {
    let ring = Ring::new();
    assert!(ring.is_empty());
    assert_eq!(ring.size(), 0);
    assert_eq!(ring.len(), 0);
    assert_eq!(ring.segment_size(), crate::DEFAULT_SEGMENT_SIZE);
}

#[test]
fn empty_ring_reads_and_peeks_nothing() {
    let mut ring = Ring::new();
    let mut buf = [0xaau8; 8];

    assert_eq!(ring.peek(&mut buf, 8), 0);
    assert_eq!(ring.read(Some(&mut buf), 8), 0);
    assert_eq!(ring.read(None, 8), 0);
    assert_eq!(buf, [0xaa; 8]);
    assert!(ring.chunk().is_empty());
}

#[test]
fn empty_write_is_noop() {
    let mut ring = Ring::new();
    ring.write(&[]);
    assert_eq!(ring.size(), 0);
    assert_eq!(ring.stats().bytes_written, 0);
}

#[test]
fn write_then_read() {
    let mut ring = Ring::new();
    ring.write(b"hello");
    ring.write(b" world");
    assert_eq!(ring.size(), 11);

    let mut buf = [0u8; 11];
    assert_eq!(ring.read(Some(&mut buf), 11), 11);
    assert_eq!(&buf, b"hello world");
    assert!(ring.is_empty());
}

#[test]
fn read_returns_available_when_max_exceeds_size() {
    let mut ring = Ring::new();
    ring.write(b"abc");

    let mut buf = [0u8; 16];
    assert_eq!(ring.read(Some(&mut buf), 16), 3);
    assert_eq!(&buf[..3], b"abc");
}

#[test]
fn read_clamps_to_output_length() {
    let mut ring = Ring::new();
    ring.write(b"abcdef");

    let mut buf = [0u8; 2];
    assert_eq!(ring.read(Some(&mut buf), 100), 2);
    assert_eq!(&buf, b"ab");
    assert_eq!(ring.size(), 4);
}

#[test]
fn read_zero_is_noop() {
    let mut ring = Ring::new();
    ring.write(b"abc");
    let mut buf = [0u8; 4];
    assert_eq!(ring.read(Some(&mut buf), 0), 0);
    assert_eq!(ring.read(None, 0), 0);
    assert_eq!(ring.size(), 3);
}

#[test]
fn peek_does_not_consume() {
    let mut ring = Ring::new();
    ring.write(b"abcdef");

    let mut first = [0u8; 4];
    let mut second = [0u8; 4];
    assert_eq!(ring.peek(&mut first, 4), 4);
    assert_eq!(ring.peek(&mut second, 4), 4);
    assert_eq!(first, second);
    assert_eq!(&first, b"abcd");
    assert_eq!(ring.size(), 6);
}

#[test]
fn peek_clamps_to_output_length() {
    let mut ring = Ring::new();
    ring.write(b"abcdef");

    let mut buf = [0u8; 3];
    assert_eq!(ring.peek(&mut buf, 6), 3);
    assert_eq!(&buf, b"abc");
}

#[test]
fn peek_then_discard_matches_read() {
    let data = pattern(1000);
    let mut a = small(64);
    let mut b = small(64);
    a.write(&data);
    b.write(&data);

    let mut peeked = vec![0u8; 300];
    assert_eq!(a.peek(&mut peeked, 300), 300);
    assert_eq!(a.read(None, 300), 300);

    let mut read = vec![0u8; 300];
    assert_eq!(b.read(Some(&mut read), 300), 300);

    assert_eq!(peeked, read);
    assert_eq!(a.size(), b.size());

    let mut rest_a = vec![0u8; 700];
    let mut rest_b = vec![0u8; 700];
    assert_eq!(a.read_into(&mut rest_a), 700);
    assert_eq!(b.read_into(&mut rest_b), 700);
    assert_eq!(rest_a, rest_b);
    assert_eq!(rest_a, data[300..]);
}

#[test]
fn discard_beyond_size_removes_everything() {
    let mut ring = Ring::new();
    ring.write(b"abc");
    assert_eq!(ring.read(None, 100), 3);
    assert!(ring.is_empty());
}

#[test]
fn write_exactly_one_segment() {
    let mut ring = small(16);
    let data = pattern(16);
    ring.write(&data);
    assert_eq!(ring.stats().segments_allocated, 1);

    let mut buf = [0u8; 16];
    assert_eq!(ring.read_into(&mut buf), 16);
    assert_eq!(buf.as_slice(), data.as_slice());
}

#[test]
fn write_one_past_segment_links_successor() {
    let mut ring = small(16);
    let data = pattern(17);
    ring.write(&data);
    assert_eq!(ring.size(), 17);
    assert_eq!(ring.stats().segments_allocated, 2);

    let mut buf = [0u8; 17];
    assert_eq!(ring.peek_into(&mut buf), 17);
    assert_eq!(buf.as_slice(), data.as_slice());
}

#[test]
fn writes_span_many_segments() {
    let mut ring = small(8);
    let mut expected = Vec::new();
    for i in 0..50u8 {
        let chunk: Vec<u8> = (0..i % 13).map(|j| i.wrapping_mul(j)).collect();
        ring.write(&chunk);
        expected.extend_from_slice(&chunk);
    }
    assert_eq!(ring.size(), expected.len());

    let mut out = vec![0u8; expected.len()];
    assert_eq!(ring.peek_into(&mut out), expected.len());
    assert_eq!(out, expected);

    let mut out = vec![0u8; expected.len()];
    assert_eq!(ring.read_into(&mut out), expected.len());
    assert_eq!(out, expected);
    assert!(ring.is_empty());
}

#[test]
fn oversized_write_gets_one_segment() {
    let mut ring = small(16);
    ring.write(b"0123456789");
    let big = pattern(100);
    ring.write(&big);

    // Tail filled first, then a single segment for the 94 remaining bytes.
    let stats = ring.stats();
    assert_eq!(stats.segments_allocated, 2);
    assert_eq!(ring.size(), 110);

    let mut buf = vec![0u8; 110];
    assert_eq!(ring.read_into(&mut buf), 110);
    assert_eq!(&buf[..10], b"0123456789");
    assert_eq!(&buf[10..], big.as_slice());
}

#[test]
fn interleaved_writes_and_reads_preserve_order() {
    let mut ring = small(7);
    let mut next_write = 0u8;
    let mut next_read = 0u8;

    for round in 0..200usize {
        let n = round % 11 + 1;
        let chunk: Vec<u8> = (0..n)
            .map(|_| {
                let b = next_write;
                next_write = next_write.wrapping_add(1);
                b
            })
            .collect();
        ring.write(&chunk);

        let mut buf = [0u8; 9];
        let got = ring.read(Some(&mut buf), round % 9 + 1);
        for &b in &buf[..got] {
            assert_eq!(b, next_read);
            next_read = next_read.wrapping_add(1);
        }
    }

    let mut rest = vec![0u8; ring.size()];
    let n = ring.read_into(&mut rest);
    for &b in &rest[..n] {
        assert_eq!(b, next_read);
        next_read = next_read.wrapping_add(1);
    }
    assert_eq!(next_read, next_write);
}

#[test]
fn chunk_stops_at_segment_boundary() {
    let mut ring = small(8);
    ring.write(b"abcdefghijkl");

    assert_eq!(ring.chunk(), b"abcdefgh");
    assert_eq!(ring.skip(8), 8);
    assert_eq!(ring.chunk(), b"ijkl");
    assert_eq!(ring.skip(4), 4);
    assert!(ring.chunk().is_empty());
}

#[test]
fn chunk_after_partial_read() {
    let mut ring = small(8);
    ring.write(b"abcdefghij");
    assert_eq!(ring.skip(3), 3);
    assert_eq!(ring.chunk(), b"defgh");
}

#[test]
fn chunk_crosses_into_successor_when_head_exhausted() {
    let mut ring = small(4);
    ring.write(b"abcd");
    assert_eq!(ring.skip(4), 4);
    // Head is exhausted but has no successor; it is kept for the producer.
    assert!(ring.chunk().is_empty());
    assert_eq!(ring.stats().segments_retired, 0);

    ring.write(b"ef");
    assert_eq!(ring.chunk(), b"ef");
}

#[test]
fn exhausted_head_retired_once_successor_linked() {
    let mut ring = small(4);
    ring.write(b"abcd");
    ring.skip(4);
    ring.write(b"efgh");
    assert_eq!(ring.stats().segments_retired, 0);

    let mut buf = [0u8; 2];
    ring.read_into(&mut buf);
    assert_eq!(&buf, b"ef");
    assert_eq!(ring.stats().segments_retired, 1);
}

#[test]
fn size_tracks_writes_minus_reads() {
    let mut ring = small(32);
    let mut written = 0;
    let mut read = 0;
    for i in 1..100 {
        ring.write(&pattern(i));
        written += i;
        read += ring.read(None, i / 2);
        assert_eq!(ring.size(), written - read);
    }
    let stats = ring.stats();
    assert_eq!(stats.bytes_written, written);
    assert_eq!(stats.bytes_read, read);
}

#[test]
fn ring_info_trait() {
    fn info<R: RingInfo>(r: &R) -> (usize, usize, bool) {
        (r.len(), r.segment_size(), r.is_empty())
    }

    let mut ring = small(64);
    assert_eq!(info(&ring), (0, 64, true));
    ring.write(b"xyz");
    assert_eq!(info(&ring), (3, 64, false));
}

#[test]
fn drop_with_buffered_data() {
    let mut ring = small(8);
    ring.write(&pattern(1000));
    ring.skip(10);
    drop(ring);
}

#[test]
fn debug_output_mentions_size() {
    let mut ring = Ring::new();
    ring.write(b"abc");
    let s = format!("{ring:?}");
    assert!(s.contains("Ring"));
    assert!(s.contains("size: 3"));
}

#[test]
fn default_matches_new() {
    let ring = Ring::default();
    assert_eq!(ring.segment_size(), crate::DEFAULT_SEGMENT_SIZE);
    assert_eq!(ring.pool_limit(), 4);
}
