// SPDX-License-Identifier: MIT

//! On-disk layout of the GPT header and partition entry.
//!
//! Every field is described once, by offset and width, and both the
//! decoders and the serializer go through these descriptors. Integers are
//! little-endian; GUID fields are raw 16-byte slots handed to
//! [`crate::guid::Guid::from_disk_bytes`].

use crate::guid::Guid;

/// Size of the header block (one 512-byte LBA).
pub const HEADER_BLOCK_SIZE: usize = 512;
/// Smallest header size UEFI allows (bytes covered by the CRC).
pub const HEADER_MIN_SIZE: usize = 92;
/// Size of the partition entry record fields decoded here.
pub const ENTRY_SIZE: usize = 128;
pub const NAME_LEN: usize = 72;

/// One fixed-position field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    #[inline]
    pub fn slice<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.offset..self.end()]
    }

    #[inline]
    pub fn slice_mut<'a>(&self, buf: &'a mut [u8]) -> &'a mut [u8] {
        &mut buf[self.offset..self.end()]
    }
}

// Header fields
pub const HDR_SIGNATURE: Field = Field::new("signature", 0, 8);
pub const HDR_REVISION: Field = Field::new("revision", 8, 4);
pub const HDR_HEADER_SIZE: Field = Field::new("header_size", 12, 4);
pub const HDR_HEADER_CRC32: Field = Field::new("header_crc32", 16, 4);
pub const HDR_RESERVED: Field = Field::new("reserved", 20, 4);
pub const HDR_CURRENT_LBA: Field = Field::new("current_lba", 24, 8);
pub const HDR_BACKUP_LBA: Field = Field::new("backup_lba", 32, 8);
pub const HDR_FIRST_USABLE_LBA: Field = Field::new("first_usable_lba", 40, 8);
pub const HDR_LAST_USABLE_LBA: Field = Field::new("last_usable_lba", 48, 8);
pub const HDR_DISK_GUID: Field = Field::new("disk_guid", 56, 16);
pub const HDR_ENTRIES_LBA: Field = Field::new("start_lba", 72, 8);
pub const HDR_NUM_ENTRIES: Field = Field::new("num_entries", 80, 4);
pub const HDR_ENTRY_SIZE: Field = Field::new("entry_size", 84, 4);
pub const HDR_ARRAY_CRC32: Field = Field::new("array_crc32", 88, 4);
pub const HDR_PADDING: Field = Field::new("padding", 92, 420);

pub const HEADER_SCHEMA: [Field; 15] = [
    HDR_SIGNATURE,
    HDR_REVISION,
    HDR_HEADER_SIZE,
    HDR_HEADER_CRC32,
    HDR_RESERVED,
    HDR_CURRENT_LBA,
    HDR_BACKUP_LBA,
    HDR_FIRST_USABLE_LBA,
    HDR_LAST_USABLE_LBA,
    HDR_DISK_GUID,
    HDR_ENTRIES_LBA,
    HDR_NUM_ENTRIES,
    HDR_ENTRY_SIZE,
    HDR_ARRAY_CRC32,
    HDR_PADDING,
];

// Entry fields
pub const ENT_TYPE_GUID: Field = Field::new("type_guid", 0, 16);
pub const ENT_UNIQUE_GUID: Field = Field::new("unique_guid", 16, 16);
pub const ENT_FIRST_LBA: Field = Field::new("first_lba", 32, 8);
pub const ENT_LAST_LBA: Field = Field::new("last_lba", 40, 8);
pub const ENT_FLAGS: Field = Field::new("flags", 48, 8);
pub const ENT_NAME: Field = Field::new("name", 56, NAME_LEN);

pub const ENTRY_SCHEMA: [Field; 6] = [
    ENT_TYPE_GUID,
    ENT_UNIQUE_GUID,
    ENT_FIRST_LBA,
    ENT_LAST_LBA,
    ENT_FLAGS,
    ENT_NAME,
];

// Readers. Callers check the buffer length beforehand.

#[inline]
pub fn get_u32(buf: &[u8], f: Field) -> u32 {
    debug_assert_eq!(f.width, 4);
    let mut b = [0u8; 4];
    b.copy_from_slice(f.slice(buf));
    u32::from_le_bytes(b)
}

#[inline]
pub fn get_u64(buf: &[u8], f: Field) -> u64 {
    debug_assert_eq!(f.width, 8);
    let mut b = [0u8; 8];
    b.copy_from_slice(f.slice(buf));
    u64::from_le_bytes(b)
}

#[inline]
pub fn get_bytes<const N: usize>(buf: &[u8], f: Field) -> [u8; N] {
    debug_assert_eq!(f.width, N);
    let mut b = [0u8; N];
    b.copy_from_slice(f.slice(buf));
    b
}

#[inline]
pub fn get_guid(buf: &[u8], f: Field) -> Guid {
    Guid::from_disk_bytes(&get_bytes::<16>(buf, f))
}

// Writers

#[inline]
pub fn put_u32(buf: &mut [u8], f: Field, v: u32) {
    debug_assert_eq!(f.width, 4);
    f.slice_mut(buf).copy_from_slice(&v.to_le_bytes());
}

#[inline]
pub fn put_u64(buf: &mut [u8], f: Field, v: u64) {
    debug_assert_eq!(f.width, 8);
    f.slice_mut(buf).copy_from_slice(&v.to_le_bytes());
}

#[inline]
pub fn put_bytes(buf: &mut [u8], f: Field, v: &[u8]) {
    f.slice_mut(buf).copy_from_slice(v);
}

#[inline]
pub fn put_guid(buf: &mut [u8], f: Field, g: &Guid) {
    put_bytes(buf, f, &g.to_disk_bytes());
}
