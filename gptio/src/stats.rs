// SPDX-License-Identifier: MIT

use crate::{ByteReader, IoResult};

/// Simple counters, no_std friendly.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ReadStats {
    pub reads: u64,
    pub read_bytes: u64,
    /// Reads that returned fewer bytes than asked (end of source).
    pub short_reads: u64,
    pub max_read: u64,
}

impl ReadStats {
    #[inline]
    pub fn reset(&mut self) {
        *self = ReadStats::default();
    }
}

/// Transparent instrumentation wrapper.
pub struct ReadCounter<'a, R: ByteReader + ?Sized> {
    inner: &'a mut R,
    pub stats: ReadStats,
}

impl<'a, R: ByteReader + ?Sized> ReadCounter<'a, R> {
    #[inline]
    pub fn new(inner: &'a mut R) -> Self {
        Self {
            inner,
            stats: ReadStats::default(),
        }
    }

    #[inline]
    pub fn snapshot(&self) -> ReadStats {
        self.stats
    }

    #[inline]
    pub fn into_inner(self) -> &'a mut R {
        self.inner
    }
}

impl<'a, R: ByteReader + ?Sized> ByteReader for ReadCounter<'a, R> {
    #[inline]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> IoResult<usize> {
        let n = self.inner.read_at(offset, buf)?;

        self.stats.reads += 1;
        self.stats.read_bytes += n as u64;
        if n < buf.len() {
            self.stats.short_reads += 1;
        }
        if self.stats.max_read < n as u64 {
            self.stats.max_read = n as u64;
        }

        Ok(n)
    }

    #[inline]
    fn size_hint(&self) -> Option<u64> {
        self.inner.size_hint()
    }
}

#[cfg(all(test, feature = "mem"))]
mod test {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_counts_reads() {
        let data = [0u8; 1000];
        let mut mem = MemReader::new(&data);
        let mut io = ReadCounter::new(&mut mem);

        io.read_vec(0, 512).unwrap();
        io.read_vec_available(900, 512).unwrap();

        let s = io.snapshot();
        // read_vec_available loops once more to observe the end of source
        assert_eq!(s.reads, 3);
        assert_eq!(s.read_bytes, 612);
        assert_eq!(s.short_reads, 2);
        assert_eq!(s.max_read, 512);
    }
}
