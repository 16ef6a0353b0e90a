// SPDX-License-Identifier: MIT

use core::fmt;

use gptio::errors::*;

/// Unified error type for the GPT read pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GptError {
    /// The byte source could not be read (missing, permission, I/O fault).
    SourceUnavailable(IoError),
    /// Fewer bytes were available than the region being decoded requires.
    TruncatedInput {
        region: &'static str,
        needed: usize,
        available: usize,
    },
    /// The bytes decode but carry no "EFI PART" signature.
    NoGptFound,
    /// Stored and recomputed CRC32 disagree.
    ChecksumMismatch {
        region: &'static str,
        stored: u32,
        computed: u32,
    },
    Invalid(&'static str),
}

impl GptError {
    pub fn msg(&self) -> &'static str {
        match self {
            GptError::SourceUnavailable(e) => e.msg(),
            GptError::TruncatedInput { .. } => "Truncated input",
            GptError::NoGptFound => "No GPT found",
            GptError::ChecksumMismatch { .. } => "CRC32 mismatch",
            GptError::Invalid(msg) => msg,
        }
    }
}

impl From<IoError> for GptError {
    fn from(e: IoError) -> Self {
        GptError::SourceUnavailable(e)
    }
}

impl fmt::Display for GptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GptError::SourceUnavailable(e) => write!(f, "Source unavailable: {e}"),
            GptError::TruncatedInput {
                region,
                needed,
                available,
            } => write!(
                f,
                "{}: {region} needs {needed} bytes, {available} available",
                self.msg()
            ),
            GptError::ChecksumMismatch {
                region,
                stored,
                computed,
            } => write!(
                f,
                "{} ({region}): stored {stored:#010x}, computed {computed:#010x}",
                self.msg()
            ),
            _ => write!(f, "{}", self.msg()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GptError {}

pub type GptResult<T = ()> = Result<T, GptError>;

/// Fails with `TruncatedInput` unless `bytes` holds at least `needed` bytes.
#[inline]
pub(crate) fn ensure_len(bytes: &[u8], needed: usize, region: &'static str) -> GptResult {
    if bytes.len() < needed {
        return Err(GptError::TruncatedInput {
            region,
            needed,
            available: bytes.len(),
        });
    }
    Ok(())
}
