// SPDX-License-Identifier: MIT

use crate::errors::*;
use crate::guid::Guid;
use crate::layout::*;

pub const GPT_SIGNATURE: &[u8; 8] = b"EFI PART";
pub const GPT_REVISION: u32 = 0x0001_0000;

#[inline]
fn crc32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// Primary (or backup) GPT header, decoded from its 512-byte block.
///
/// Reserved regions are carried verbatim so that [`GptHeader::encode`]
/// reproduces the exact on-disk block, but they are never interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GptHeader {
    pub signature: [u8; 8],
    pub revision: u32,
    pub header_size: u32,
    pub header_crc32: u32,
    pub reserved: u32,
    pub current_lba: u64,
    pub backup_lba: u64,
    pub first_usable_lba: u64,
    pub last_usable_lba: u64,
    pub disk_guid: Guid,
    pub entries_lba: u64,
    pub num_entries: u32,
    pub entry_size: u32,
    pub array_crc32: u32,
    pub padding: [u8; 420],
}

impl GptHeader {
    /// Decodes the first 512 bytes of `bytes`.
    ///
    /// The signature is not checked here, see [`GptHeader::check_signature`].
    pub fn decode(bytes: &[u8]) -> GptResult<Self> {
        ensure_len(bytes, HEADER_BLOCK_SIZE, "GPT header")?;

        Ok(Self {
            signature: get_bytes(bytes, HDR_SIGNATURE),
            revision: get_u32(bytes, HDR_REVISION),
            header_size: get_u32(bytes, HDR_HEADER_SIZE),
            header_crc32: get_u32(bytes, HDR_HEADER_CRC32),
            reserved: get_u32(bytes, HDR_RESERVED),
            current_lba: get_u64(bytes, HDR_CURRENT_LBA),
            backup_lba: get_u64(bytes, HDR_BACKUP_LBA),
            first_usable_lba: get_u64(bytes, HDR_FIRST_USABLE_LBA),
            last_usable_lba: get_u64(bytes, HDR_LAST_USABLE_LBA),
            disk_guid: get_guid(bytes, HDR_DISK_GUID),
            entries_lba: get_u64(bytes, HDR_ENTRIES_LBA),
            num_entries: get_u32(bytes, HDR_NUM_ENTRIES),
            entry_size: get_u32(bytes, HDR_ENTRY_SIZE),
            array_crc32: get_u32(bytes, HDR_ARRAY_CRC32),
            padding: get_bytes(bytes, HDR_PADDING),
        })
    }

    /// Serializes back to the 512-byte on-disk block.
    pub fn encode(&self) -> [u8; HEADER_BLOCK_SIZE] {
        let mut out = [0u8; HEADER_BLOCK_SIZE];
        put_bytes(&mut out, HDR_SIGNATURE, &self.signature);
        put_u32(&mut out, HDR_REVISION, self.revision);
        put_u32(&mut out, HDR_HEADER_SIZE, self.header_size);
        put_u32(&mut out, HDR_HEADER_CRC32, self.header_crc32);
        put_u32(&mut out, HDR_RESERVED, self.reserved);
        put_u64(&mut out, HDR_CURRENT_LBA, self.current_lba);
        put_u64(&mut out, HDR_BACKUP_LBA, self.backup_lba);
        put_u64(&mut out, HDR_FIRST_USABLE_LBA, self.first_usable_lba);
        put_u64(&mut out, HDR_LAST_USABLE_LBA, self.last_usable_lba);
        put_guid(&mut out, HDR_DISK_GUID, &self.disk_guid);
        put_u64(&mut out, HDR_ENTRIES_LBA, self.entries_lba);
        put_u32(&mut out, HDR_NUM_ENTRIES, self.num_entries);
        put_u32(&mut out, HDR_ENTRY_SIZE, self.entry_size);
        put_u32(&mut out, HDR_ARRAY_CRC32, self.array_crc32);
        put_bytes(&mut out, HDR_PADDING, &self.padding);
        out
    }

    /// Exact byte match against `"EFI PART"`.
    #[inline]
    pub fn check_signature(&self) -> bool {
        &self.signature == GPT_SIGNATURE
    }

    /// `header_size` lies within [92, 512].
    #[inline]
    pub fn has_plausible_size(&self) -> bool {
        (HEADER_MIN_SIZE..=HEADER_BLOCK_SIZE).contains(&(self.header_size as usize))
    }

    /// CRC32 (IEEE) of the first `header_size` bytes of the serialized
    /// header, with the CRC field itself zeroed.
    ///
    /// A `header_size` above 512 is clamped to the block size.
    pub fn calculate_crc32(&self) -> u32 {
        let mut bytes = self.encode();
        put_u32(&mut bytes, HDR_HEADER_CRC32, 0);
        let len = (self.header_size as usize).min(HEADER_BLOCK_SIZE);
        crc32(&bytes[..len])
    }

    /// Stored CRC32 matches the recomputed one.
    ///
    /// Always false when `header_size` is outside [92, 512].
    pub fn check_crc32(&self) -> bool {
        self.has_plausible_size() && self.calculate_crc32() == self.header_crc32
    }

    /// Same as [`GptHeader::check_crc32`], as a `Result` carrying both values.
    pub fn verify_crc32(&self) -> GptResult {
        if !self.has_plausible_size() {
            return Err(GptError::Invalid("GPT: header_size out of range"));
        }
        let computed = self.calculate_crc32();
        if computed != self.header_crc32 {
            return Err(GptError::ChecksumMismatch {
                region: "header",
                stored: self.header_crc32,
                computed,
            });
        }
        Ok(())
    }

    /// Declared byte length of the partition entry array.
    #[inline]
    pub fn entries_len(&self) -> Option<usize> {
        (self.num_entries as usize).checked_mul(self.entry_size as usize)
    }

    /// Copy with `header_crc32` replaced by the recomputed value.
    pub fn with_computed_crc32(mut self) -> Self {
        self.header_crc32 = self.calculate_crc32();
        self
    }
}
