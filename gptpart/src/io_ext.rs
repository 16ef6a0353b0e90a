// SPDX-License-Identifier: MIT

//! "LBA-aware" ByteReader helpers to avoid `* sector_size` everywhere,
//! with overflow-check.

use alloc::vec::Vec;

use gptio::prelude::*;

/// Offset = LBA * sector_size (with overflow-check)
#[inline]
pub(crate) fn lba_offset(lba: u64, sector_size: u64) -> IoResult<u64> {
    lba.checked_mul(sector_size).ok_or(IoError::Overflow)
}

/// LBA-addressed reads.
pub trait ByteReaderLbaExt: ByteReader {
    /// Reads up to `len` bytes starting at an LBA (offset = lba * sector_size).
    /// The result is shorter than `len` when the source ends first.
    #[inline]
    fn read_vec_available_lba(&mut self, lba: u64, sector_size: u64, len: usize) -> IoResult<Vec<u8>> {
        let off = lba_offset(lba, sector_size)?;
        self.read_vec_available(off, len)
    }
}

impl<T: ByteReader + ?Sized> ByteReaderLbaExt for T {}
