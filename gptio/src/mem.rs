// SPDX-License-Identifier: MIT

use crate::{ByteReader, IoError, IoResult};

/// In-memory implementation of `ByteReader`.
///
/// Useful for tests, images already loaded in RAM, or buffers handed over
/// by firmware.
#[derive(Debug, Clone, Copy)]
pub struct MemReader<'a> {
    buffer: &'a [u8],
    base_offset: u64,
}

impl<'a> MemReader<'a> {
    #[inline]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            base_offset: 0,
        }
    }

    /// Reader whose offset 0 maps to `buffer[base_offset]`.
    #[inline]
    pub fn new_with_offset(buffer: &'a [u8], base_offset: u64) -> Self {
        Self {
            buffer,
            base_offset,
        }
    }
}

impl<'a> ByteReader for MemReader<'a> {
    #[inline]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> IoResult<usize> {
        let abs = self
            .base_offset
            .checked_add(offset)
            .ok_or(IoError::Overflow)?;
        let len = self.buffer.len() as u64;
        if abs >= len {
            return Ok(0);
        }
        let start = abs as usize;
        let n = buf.len().min(self.buffer.len() - start);
        buf[..n].copy_from_slice(&self.buffer[start..start + n]);
        Ok(n)
    }

    #[inline]
    fn size_hint(&self) -> Option<u64> {
        Some((self.buffer.len() as u64).saturating_sub(self.base_offset))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_read_inside() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let mut io = MemReader::new(&data);
        let mut out = [0u8; 3];
        assert_eq!(io.read_at(2, &mut out).unwrap(), 3);
        assert_eq!(out, [3, 4, 5]);
    }

    #[test]
    fn test_read_past_end_is_short() {
        let data = [0xAAu8; 10];
        let mut io = MemReader::new(&data);
        let mut out = [0u8; 8];
        assert_eq!(io.read_at(6, &mut out).unwrap(), 4);
        assert_eq!(io.read_at(10, &mut out).unwrap(), 0);
        assert_eq!(io.read_at(u64::MAX, &mut out).unwrap(), 0);
    }

    #[test]
    fn test_read_exact_reports_short_read() {
        let data = [0u8; 100];
        let mut io = MemReader::new(&data);
        let err = io.read_vec(90, 20).unwrap_err();
        assert_eq!(
            err,
            IoError::ShortRead {
                offset: 90,
                wanted: 20,
                got: 10
            }
        );
    }

    #[test]
    fn test_read_vec_available_truncates() {
        let data = [7u8; 100];
        let mut io = MemReader::new(&data);
        let v = io.read_vec_available(64, 512).unwrap();
        assert_eq!(v.len(), 36);
        assert!(v.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_base_offset() {
        let data: Vec<u8> = (0u8..32).collect();
        let mut io = MemReader::new_with_offset(&data, 16);
        assert_eq!(io.size_hint(), Some(16));
        let v = io.read_vec(0, 4).unwrap();
        assert_eq!(v, vec![16, 17, 18, 19]);
    }

    #[test]
    fn test_read_struct() {
        let data = 0xDEAD_BEEFu32.to_le_bytes();
        let mut io = MemReader::new(&data);
        let v: [u8; 4] = io.read_struct(0).unwrap();
        assert_eq!(u32::from_le_bytes(v), 0xDEAD_BEEF);
        assert!(io.read_struct::<[u8; 8]>(0).is_err());
    }
}
