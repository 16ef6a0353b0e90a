// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{Error, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::{ByteReader, IoError, IoResult};

/// `ByteReader` over any seekable byte stream (image file, block device...).
///
/// The reader owns its stream: dropping it releases the handle, whatever
/// path the caller leaves through.
#[derive(Debug)]
pub struct FileReader<T: Read + Seek> {
    io: T,
    base_offset: u64,
    /// Byte length when known up front (regular files; block devices report 0).
    len: Option<u64>,
}

impl FileReader<File> {
    /// Opens `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let file = File::open(path)?;
        let meta = file.metadata()?;
        let len = meta.is_file().then_some(meta.len());
        Ok(Self {
            io: file,
            base_offset: 0,
            len,
        })
    }
}

impl<T: Read + Seek> FileReader<T> {
    #[inline]
    pub fn new(io: T) -> Self {
        Self {
            io,
            base_offset: 0,
            len: None,
        }
    }

    #[inline]
    pub fn new_with_offset(io: T, base_offset: u64) -> Self {
        Self {
            io,
            base_offset,
            len: None,
        }
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.io
    }
}

impl<T: Read + Seek> ByteReader for FileReader<T> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> IoResult<usize> {
        let abs_offset = self
            .base_offset
            .checked_add(offset)
            .ok_or(IoError::Overflow)?;
        self.io.seek(SeekFrom::Start(abs_offset))?;
        loop {
            match self.io.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> Option<u64> {
        self.len.map(|len| len.saturating_sub(self.base_offset))
    }
}

impl From<Error> for IoError {
    #[cold]
    #[inline(never)]
    fn from(e: Error) -> Self {
        match e.kind() {
            ErrorKind::NotFound => IoError::NotFound,
            ErrorKind::PermissionDenied => IoError::PermissionDenied,
            ErrorKind::UnexpectedEof => IoError::Other("unexpected end of file"),
            ErrorKind::InvalidInput => IoError::Other("invalid input"),
            _ => IoError::Other("I/O error"),
        }
    }
}
