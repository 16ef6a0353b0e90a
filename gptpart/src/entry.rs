// SPDX-License-Identifier: MIT

use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::errors::*;
use crate::guid::Guid;
use crate::guids::PartitionKind;
use crate::layout::*;

bitflags! {
    /// GPT partition attribute flags (64-bit field of the entry).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GptAttributes: u64 {
        /// Required by the platform.
        const PLATFORM_REQUIRED = 1 << 0;
        /// Firmware must not produce a block IO protocol for it.
        const NO_BLOCK_IO_PROTOCOL = 1 << 1;
        const LEGACY_BIOS_BOOTABLE = 1 << 2;
        // Bits 48..=63 are type specific; these are the Microsoft basic data ones.
        const READ_ONLY = 1 << 60;
        const SHADOW_COPY = 1 << 61;
        const HIDDEN = 1 << 62;
        const NO_DRIVE_LETTER = 1 << 63;
    }
}

/// One slot of the partition entry array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartitionEntry {
    pub type_guid: Guid,
    pub unique_guid: Guid,
    pub first_lba: u64,
    pub last_lba: u64,
    pub flags: u64,
    /// Raw name bytes (UTF-16LE on disk, kept untouched).
    pub name: [u8; NAME_LEN],
}

impl PartitionEntry {
    pub const UNUSED: PartitionEntry = PartitionEntry {
        type_guid: Guid::NIL,
        unique_guid: Guid::NIL,
        first_lba: 0,
        last_lba: 0,
        flags: 0,
        name: [0u8; NAME_LEN],
    };

    /// Decodes the first 128 bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> GptResult<Self> {
        ensure_len(bytes, ENTRY_SIZE, "GPT partition entry")?;

        Ok(Self {
            type_guid: get_guid(bytes, ENT_TYPE_GUID),
            unique_guid: get_guid(bytes, ENT_UNIQUE_GUID),
            first_lba: get_u64(bytes, ENT_FIRST_LBA),
            last_lba: get_u64(bytes, ENT_LAST_LBA),
            flags: get_u64(bytes, ENT_FLAGS),
            name: get_bytes(bytes, ENT_NAME),
        })
    }

    pub fn encode(&self) -> [u8; ENTRY_SIZE] {
        let mut out = [0u8; ENTRY_SIZE];
        put_guid(&mut out, ENT_TYPE_GUID, &self.type_guid);
        put_guid(&mut out, ENT_UNIQUE_GUID, &self.unique_guid);
        put_u64(&mut out, ENT_FIRST_LBA, self.first_lba);
        put_u64(&mut out, ENT_LAST_LBA, self.last_lba);
        put_u64(&mut out, ENT_FLAGS, self.flags);
        put_bytes(&mut out, ENT_NAME, &self.name);
        out
    }

    /// An entry is unused iff its partition type GUID is nil.
    ///
    /// The LBA fields play no part: a zeroed LBA range on a typed entry
    /// still counts as used.
    #[inline]
    pub fn is_unused(&self) -> bool {
        self.type_guid.is_nil()
    }

    #[inline]
    pub fn is_used(&self) -> bool {
        !self.is_unused()
    }

    #[inline]
    pub fn raw_name(&self) -> &[u8; NAME_LEN] {
        &self.name
    }

    /// Name decoded from UTF-16LE, up to the first NUL. Invalid code units
    /// become U+FFFD.
    pub fn name(&self) -> String {
        let units = self
            .name
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .take_while(|&c| c != 0);
        char::decode_utf16(units)
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    #[inline]
    pub fn kind(&self) -> PartitionKind {
        PartitionKind::from_guid(&self.type_guid)
    }

    #[inline]
    pub fn attributes(&self) -> GptAttributes {
        GptAttributes::from_bits_retain(self.flags)
    }

    /// Number of sectors covered by `[first_lba, last_lba]`, 0 if inverted.
    pub fn size_sectors(&self) -> u64 {
        if self.last_lba >= self.first_lba {
            (self.last_lba - self.first_lba).saturating_add(1)
        } else {
            0
        }
    }
}

/// Encodes `name` as UTF-16LE into the 72-byte name field (truncated at
/// 36 code units).
pub fn encode_gpt_name(name: &str) -> [u8; NAME_LEN] {
    let mut buf = [0u8; NAME_LEN];
    for (i, c) in name.encode_utf16().take(NAME_LEN / 2).enumerate() {
        buf[2 * i..2 * i + 2].copy_from_slice(&c.to_le_bytes());
    }
    buf
}

/// Decodes `count` records of `entry_size` bytes each.
///
/// Bytes past the first 128 of a larger record are skipped. The whole
/// array must be present: a short buffer yields `TruncatedInput` and no
/// entries at all.
pub fn decode_entries(bytes: &[u8], count: usize, entry_size: usize) -> GptResult<Vec<PartitionEntry>> {
    if entry_size < ENTRY_SIZE {
        return Err(GptError::Invalid("GPT: entry_size smaller than 128"));
    }
    let needed = count
        .checked_mul(entry_size)
        .ok_or(GptError::Invalid("GPT: entries byte length overflow"))?;
    ensure_len(bytes, needed, "GPT partition entry array")?;

    bytes[..needed]
        .chunks_exact(entry_size)
        .map(PartitionEntry::decode)
        .collect()
}
