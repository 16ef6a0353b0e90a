// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

// Core modules
pub mod errors;
pub mod stats;

// Backend modules
#[cfg(feature = "mem")]
mod mem;

#[cfg(feature = "std")]
mod file;

// Prelude re-exports (central entrypoint)
pub mod prelude {
    pub use super::ByteReader;
    pub use super::ByteReaderExt;
    pub use super::ByteReaderStructExt;
    pub use super::errors::*;
    pub use super::stats::*;

    #[cfg(feature = "mem")]
    pub use super::mem::MemReader;

    #[cfg(feature = "std")]
    pub use super::file::FileReader;
}

use errors::*;

/// Maximum size of the stack scratch buffer used by `read_struct`.
/// 4 KiB covers every on-disk record this toolkit decodes.
pub const BLOCK_BUF_SIZE: usize = 4096;

/// Read-only byte-range source.
///
/// Implementations may target RAM, image files, block devices, etc.
/// The source is never written through this trait.
pub trait ByteReader {
    /// Reads at most `buf.len()` bytes starting at `offset` (absolute).
    ///
    /// Returns the number of bytes copied into `buf`. `Ok(0)` means the
    /// end of the source was reached; a short count is not an error here.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> IoResult<usize>;

    /// Total size of the source in bytes, if the backend knows it.
    fn size_hint(&self) -> Option<u64> {
        None
    }
}

/// Extension helpers for ByteReader.
///
/// - exact reads that fail with `ShortRead`
/// - "as much as available" reads used by decoders to detect truncation
/// - owned `read(offset, length) -> bytes` helpers
pub trait ByteReaderExt: ByteReader {
    /// Fills `buf` completely or fails with `IoError::ShortRead`.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> IoResult {
        let got = self.read_available(offset, buf)?;
        if got < buf.len() {
            return Err(IoError::ShortRead {
                offset,
                wanted: buf.len(),
                got,
            });
        }
        Ok(())
    }

    /// Reads until `buf` is full or the source ends; returns bytes read.
    fn read_available(&mut self, offset: u64, buf: &mut [u8]) -> IoResult<usize> {
        let mut pos = 0usize;
        while pos < buf.len() {
            let off = offset
                .checked_add(pos as u64)
                .ok_or(IoError::Overflow)?;
            let n = self.read_at(off, &mut buf[pos..])?;
            if n == 0 {
                break;
            }
            pos += n;
        }
        Ok(pos)
    }

    /// Reads exactly `len` bytes from `offset` into a fresh buffer.
    fn read_vec(&mut self, offset: u64, len: usize) -> IoResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_exact_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Reads up to `len` bytes from `offset`; the result is shorter than
    /// `len` when the source ends first.
    fn read_vec_available(&mut self, offset: u64, len: usize) -> IoResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let got = self.read_available(offset, &mut buf)?;
        buf.truncate(got);
        Ok(buf)
    }
}

impl<T: ByteReader + ?Sized> ByteReaderExt for T {}

/// Extension trait for reading structs using zerocopy.
///
/// Requires the struct to implement zerocopy traits for safe conversion.
pub trait ByteReaderStructExt: ByteReader {
    /// Reads a struct of type `T` from the given offset.
    fn read_struct<T: zerocopy::FromBytes + zerocopy::KnownLayout + zerocopy::Immutable>(
        &mut self,
        offset: u64,
    ) -> IoResult<T> {
        let size = core::mem::size_of::<T>();
        if size > BLOCK_BUF_SIZE {
            return Err(IoError::Other("read_struct: type too large"));
        }
        let mut buf = [0u8; BLOCK_BUF_SIZE];
        self.read_exact_at(offset, &mut buf[..size])?;
        T::read_from_bytes(&buf[..size]).map_err(|_| IoError::Other("read_struct failed"))
    }
}

impl<T: ByteReader + ?Sized> ByteReaderStructExt for T {}
