// SPDX-License-Identifier: MIT

use core::fmt;

/// Result type for ByteReader operations.
pub type IoResult<T = ()> = core::result::Result<T, IoError>;

/// Error type for ByteReader operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    /// The source does not exist.
    NotFound,
    /// The source exists but cannot be opened or read.
    PermissionDenied,
    /// Fewer bytes than requested were available at `offset`.
    ShortRead { offset: u64, wanted: usize, got: usize },
    /// `offset + len` or `lba * sector_size` does not fit in a u64.
    Overflow,
    Other(&'static str),
}

impl IoError {
    pub fn msg(&self) -> &'static str {
        match self {
            IoError::NotFound => "Source not found",
            IoError::PermissionDenied => "Permission denied",
            IoError::ShortRead { .. } => "Short read",
            IoError::Overflow => "Offset overflow",
            IoError::Other(msg) => msg,
        }
    }
}

impl From<&'static str> for IoError {
    #[inline]
    fn from(msg: &'static str) -> Self {
        IoError::Other(msg)
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::ShortRead {
                offset,
                wanted,
                got,
            } => write!(
                f,
                "{}: wanted {wanted} bytes at offset {offset}, got {got}",
                self.msg()
            ),
            _ => write!(f, "{}", self.msg()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IoError {}
