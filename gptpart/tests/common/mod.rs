// SPDX-License-Identifier: MIT
#![allow(dead_code)]

use gptpart::entry::{PartitionEntry, encode_gpt_name};
use gptpart::guid::Guid;
use gptpart::guids::{GPT_PARTITION_TYPE_ESP, GPT_PARTITION_TYPE_LINUX_FS, GPT_PARTITION_TYPE_LINUX_SWAP};
use gptpart::header::{GPT_REVISION, GPT_SIGNATURE, GptHeader};
use gptpart::mbr::{MBR_SIGNATURE, PROTECTIVE_GPT};

pub const SECTOR: usize = 512;
pub const TOTAL_SECTORS: usize = 4096;

/// d0f2f537-fdf7-41ad-acb9-42f0aeb3781d
pub const DISK_GUID: Guid = Guid::from_fields(
    0xd0f2_f537,
    0xfdf7,
    0x41ad,
    [0xac, 0xb9, 0x42, 0xf0, 0xae, 0xb3, 0x78, 0x1d],
);

pub fn unique(n: u8) -> Guid {
    Guid::from_fields(0x1000_0000 | n as u32, 0x2000, 0x4000 | n as u16, [0x80, n, 0, 0, 0, 0, 0, n])
}

/// 128 slots, used at indices 0, 1 and 127 only.
pub fn gapped_entries() -> Vec<PartitionEntry> {
    let mut entries = vec![PartitionEntry::UNUSED; 128];
    entries[0] = PartitionEntry {
        type_guid: GPT_PARTITION_TYPE_ESP,
        unique_guid: unique(1),
        first_lba: 34,
        last_lba: 1000,
        flags: 0,
        name: encode_gpt_name("EFI"),
    };
    entries[1] = PartitionEntry {
        type_guid: GPT_PARTITION_TYPE_LINUX_FS,
        unique_guid: unique(2),
        first_lba: 1001,
        last_lba: 1500,
        flags: 0,
        name: encode_gpt_name("rootfs"),
    };
    entries[127] = PartitionEntry {
        type_guid: GPT_PARTITION_TYPE_LINUX_SWAP,
        unique_guid: unique(3),
        first_lba: 1501,
        last_lba: 2014,
        flags: 0,
        name: encode_gpt_name("swap"),
    };
    entries
}

pub fn entries_bytes(entries: &[PartitionEntry]) -> Vec<u8> {
    entries.iter().flat_map(|e| e.encode()).collect()
}

/// Primary header describing `entries` at LBA 2, with both CRCs filled in.
pub fn header_for(entries: &[PartitionEntry]) -> GptHeader {
    GptHeader {
        signature: *GPT_SIGNATURE,
        revision: GPT_REVISION,
        header_size: 92,
        header_crc32: 0,
        reserved: 0,
        current_lba: 1,
        backup_lba: (TOTAL_SECTORS - 1) as u64,
        first_usable_lba: 34,
        last_usable_lba: (TOTAL_SECTORS - 34) as u64,
        disk_guid: DISK_GUID,
        entries_lba: 2,
        num_entries: entries.len() as u32,
        entry_size: 128,
        array_crc32: crc32fast::hash(&entries_bytes(entries)),
        padding: [0u8; 420],
    }
    .with_computed_crc32()
}

/// Whole-disk image: protective MBR, primary header, entry array.
pub fn disk_image(header: &GptHeader, entries: &[PartitionEntry]) -> Vec<u8> {
    let mut img = vec![0u8; TOTAL_SECTORS * SECTOR];

    // protective MBR
    img[446 + 4] = PROTECTIVE_GPT;
    img[446 + 8..446 + 12].copy_from_slice(&1u32.to_le_bytes());
    img[446 + 12..446 + 16].copy_from_slice(&((TOTAL_SECTORS - 1) as u32).to_le_bytes());
    img[510..512].copy_from_slice(&MBR_SIGNATURE);

    img[SECTOR..2 * SECTOR].copy_from_slice(&header.encode());
    let array = entries_bytes(entries);
    let start = header.entries_lba as usize * SECTOR;
    img[start..start + array.len()].copy_from_slice(&array);
    img
}

pub fn default_image() -> Vec<u8> {
    let entries = gapped_entries();
    disk_image(&header_for(&entries), &entries)
}
