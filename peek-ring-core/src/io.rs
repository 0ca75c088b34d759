//! `std::io` adapters.
//!
//! Writing never fails and never short-writes. Reading from an empty ring
//! returns `Ok(0)`: the ring cannot tell "no data yet" from "no more data",
//! so callers that need end-of-stream must signal it out of band.

use std::io::{self, BufRead, Read, Write};

use crate::{Ring, RingReader, RingWriter};

impl Write for Ring {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ring::write(self, buf);
        Ok(buf.len())
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Ring::write(self, buf);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for RingWriter {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RingWriter::write(self, buf);
        Ok(buf.len())
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        RingWriter::write(self, buf);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for Ring {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf))
    }
}

impl Read for RingReader {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf))
    }
}

impl BufRead for Ring {
    #[inline]
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.chunk())
    }

    #[inline]
    fn consume(&mut self, amt: usize) {
        let skipped = self.skip(amt);
        debug_assert_eq!(skipped, amt, "consumed past the buffered bytes");
    }
}

impl BufRead for RingReader {
    #[inline]
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.chunk())
    }

    #[inline]
    fn consume(&mut self, amt: usize) {
        let skipped = self.skip(amt);
        debug_assert_eq!(skipped, amt, "consumed past the buffered bytes");
    }
}
