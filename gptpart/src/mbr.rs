// SPDX-License-Identifier: MIT

//! Protective MBR inspection (LBA 0).

use gptio::prelude::*;
use log::warn;
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::errors::*;

pub const MBR_SIGNATURE: [u8; 2] = [0x55, 0xAA];
pub const PROTECTIVE_GPT: u8 = 0xEE;

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct MbrEntry {
    pub boot_flag: u8,
    pub starting_chs: [u8; 3],
    pub part_type: u8,
    pub end_chs: [u8; 3],
    pub start_lba: U32,
    pub sectors: U32,
}

impl MbrEntry {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.part_type == 0
    }
}

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C)]
pub struct Mbr {
    pub bootstrap_code: [u8; 446],
    pub entries: [MbrEntry; 4],
    pub signature: [u8; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbrKind {
    /// No boot signature, or no populated entry.
    Empty,
    /// First entry is of type 0xEE: a GPT follows.
    Protective,
    /// Classic MBR partitions, no GPT protection.
    Legacy,
}

impl Mbr {
    #[inline]
    pub fn has_signature(&self) -> bool {
        self.signature == MBR_SIGNATURE
    }

    #[inline]
    pub fn is_protective(&self) -> bool {
        self.entries[0].part_type == PROTECTIVE_GPT
    }

    pub fn kind(&self) -> MbrKind {
        if !self.has_signature() {
            MbrKind::Empty
        } else if self.is_protective() {
            MbrKind::Protective
        } else if self.entries.iter().any(|e| !e.is_empty()) {
            MbrKind::Legacy
        } else {
            MbrKind::Empty
        }
    }
}

/// Reads LBA 0 and requires the 0x55AA boot signature.
pub fn read_mbr<R: ByteReader + ?Sized>(io: &mut R) -> GptResult<Mbr> {
    let mbr: Mbr = io.read_struct(0).map_err(|e| match e {
        IoError::ShortRead { got, .. } => GptError::TruncatedInput {
            region: "MBR",
            needed: core::mem::size_of::<Mbr>(),
            available: got,
        },
        other => GptError::SourceUnavailable(other),
    })?;
    if !mbr.has_signature() {
        return Err(GptError::Invalid("MBR: missing boot signature"));
    }
    Ok(mbr)
}

/// Classifies LBA 0 without failing on a missing signature.
pub fn probe_mbr<R: ByteReader + ?Sized>(io: &mut R) -> GptResult<MbrKind> {
    let kind = match read_mbr(io) {
        Ok(mbr) => mbr.kind(),
        Err(GptError::Invalid(_)) => MbrKind::Empty,
        Err(e) => return Err(e),
    };
    if kind != MbrKind::Protective {
        warn!("MBR: no protective entry at LBA 0 ({kind:?})");
    }
    Ok(kind)
}
