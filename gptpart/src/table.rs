// SPDX-License-Identifier: MIT

use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, trace};
use uuid::Uuid;

use crate::entry::{PartitionEntry, decode_entries};
use crate::errors::*;
use crate::guid::Guid;
use crate::guids::PartitionKind;
use crate::header::GptHeader;
use crate::layout::ENTRY_SIZE;

/// A used slot of the entry array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition<'a> {
    /// 1-based slot number (index + 1).
    pub number: u32,
    pub entry: &'a PartitionEntry,
}

impl<'a> Partition<'a> {
    #[inline]
    pub fn unique_guid(&self) -> Guid {
        self.entry.unique_guid
    }

    #[inline]
    pub fn unique_uuid(&self) -> Uuid {
        self.entry.unique_guid.to_uuid()
    }

    #[inline]
    pub fn first_lba(&self) -> u64 {
        self.entry.first_lba
    }

    #[inline]
    pub fn last_lba(&self) -> u64 {
        self.entry.last_lba
    }

    #[inline]
    pub fn name(&self) -> String {
        self.entry.name()
    }

    #[inline]
    pub fn kind(&self) -> PartitionKind {
        self.entry.kind()
    }
}

/// Used entries of `entries`, in slot order, numbered `index + 1`.
///
/// Every slot is classified on its own: unused slots may sit between used
/// ones, so the scan never stops early.
pub fn enumerate(entries: &[PartitionEntry]) -> impl Iterator<Item = Partition<'_>> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_used())
        .map(|(i, entry)| Partition {
            number: i as u32 + 1,
            entry,
        })
}

/// A validated GUID Partition Table: header plus the full entry array.
///
/// Only built from a header whose signature matched, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuidPartitionTable {
    header: GptHeader,
    entries: Vec<PartitionEntry>,
    /// Entry array exactly as read, for the array CRC32.
    array_bytes: Vec<u8>,
}

fn encode_array(entries: &[PartitionEntry], entry_size: usize) -> Vec<u8> {
    let slot = entry_size.max(ENTRY_SIZE);
    let mut out = alloc::vec![0u8; entries.len() * slot];
    for (e, dst) in entries.iter().zip(out.chunks_exact_mut(slot)) {
        dst[..ENTRY_SIZE].copy_from_slice(&e.encode());
    }
    out
}

impl GuidPartitionTable {
    /// Composes a table from decoded parts.
    ///
    /// Fails with `NoGptFound` if the header signature does not match. The
    /// entry array CRC is later computed over the entries re-serialized in
    /// `entry_size` slots.
    pub fn assemble(header: GptHeader, entries: Vec<PartitionEntry>) -> GptResult<Self> {
        if !header.check_signature() {
            return Err(GptError::NoGptFound);
        }
        let array_bytes = encode_array(&entries, header.entry_size as usize);
        Ok(Self {
            header,
            entries,
            array_bytes,
        })
    }

    /// Decodes `count` records of `entry_size` bytes from `raw` and keeps
    /// the raw array for the array CRC.
    pub(crate) fn assemble_from_raw(
        header: GptHeader,
        mut raw: Vec<u8>,
        count: usize,
        entry_size: usize,
    ) -> GptResult<Self> {
        if !header.check_signature() {
            return Err(GptError::NoGptFound);
        }
        let entries = decode_entries(&raw, count, entry_size)?;
        raw.truncate(count * entry_size);
        for p in enumerate(&entries) {
            trace!(
                "GPT: slot {} used, type {}, LBA {}..={}",
                p.number,
                p.entry.type_guid,
                p.first_lba(),
                p.last_lba()
            );
        }
        debug!(
            "GPT: assembled table, disk {} ({} slots, {} used)",
            header.disk_guid,
            entries.len(),
            entries.iter().filter(|e| e.is_used()).count()
        );
        Ok(Self {
            header,
            entries,
            array_bytes: raw,
        })
    }

    #[inline]
    pub fn header(&self) -> &GptHeader {
        &self.header
    }

    /// All slots, used or not.
    #[inline]
    pub fn entries(&self) -> &[PartitionEntry] {
        &self.entries
    }

    #[inline]
    pub fn disk_guid(&self) -> Guid {
        self.header.disk_guid
    }

    #[inline]
    pub fn disk_uuid(&self) -> Uuid {
        self.header.disk_guid.to_uuid()
    }

    #[inline]
    pub fn header_crc32(&self) -> u32 {
        self.header.header_crc32
    }

    #[inline]
    pub fn header_size(&self) -> u32 {
        self.header.header_size
    }

    #[inline]
    pub fn first_usable_lba(&self) -> u64 {
        self.header.first_usable_lba
    }

    #[inline]
    pub fn last_usable_lba(&self) -> u64 {
        self.header.last_usable_lba
    }

    #[inline]
    pub fn entries_lba(&self) -> u64 {
        self.header.entries_lba
    }

    #[inline]
    pub fn entry_size(&self) -> u32 {
        self.header.entry_size
    }

    /// Used partitions in slot order.
    pub fn partitions(&self) -> impl Iterator<Item = Partition<'_>> {
        enumerate(&self.entries)
    }

    /// The used partition with 1-based `number`, if any.
    pub fn partition(&self, number: u32) -> Option<Partition<'_>> {
        let idx = (number as usize).checked_sub(1)?;
        let entry = self.entries.get(idx)?;
        entry.is_used().then_some(Partition { number, entry })
    }

    pub fn used_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_used()).count()
    }

    #[inline]
    pub fn check_signature(&self) -> bool {
        self.header.check_signature()
    }

    #[inline]
    pub fn calculate_crc32(&self) -> u32 {
        self.header.calculate_crc32()
    }

    #[inline]
    pub fn check_crc32(&self) -> bool {
        self.header.check_crc32()
    }

    /// CRC32 (IEEE) of the partition entry array.
    pub fn calculate_entries_crc32(&self) -> u32 {
        crc32fast::hash(&self.array_bytes)
    }

    pub fn check_entries_crc32(&self) -> bool {
        self.calculate_entries_crc32() == self.header.array_crc32
    }

    /// Header then entry array CRC; the first disagreement is returned.
    pub fn verify_crc32(&self) -> GptResult {
        self.header.verify_crc32()?;
        let computed = self.calculate_entries_crc32();
        if computed != self.header.array_crc32 {
            return Err(GptError::ChecksumMismatch {
                region: "partition entry array",
                stored: self.header.array_crc32,
                computed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::encode_gpt_name;
    use crate::guids::*;
    use crate::header::{GPT_REVISION, GPT_SIGNATURE};

    fn entry(first: u64, last: u64, name: &str, uid: u8) -> PartitionEntry {
        PartitionEntry {
            type_guid: GPT_PARTITION_TYPE_LINUX_FS,
            unique_guid: Guid::from_fields(uid as u32, 0, 0, [uid; 8]),
            first_lba: first,
            last_lba: last,
            flags: 0,
            name: encode_gpt_name(name),
        }
    }

    fn header(num_entries: u32) -> GptHeader {
        GptHeader {
            signature: *GPT_SIGNATURE,
            revision: GPT_REVISION,
            header_size: 92,
            header_crc32: 0,
            reserved: 0,
            current_lba: 1,
            backup_lba: 4095,
            first_usable_lba: 34,
            last_usable_lba: 4062,
            disk_guid: Guid::from_fields(0xd0f2_f537, 0xfdf7, 0x41ad, [0xac, 0xb9, 0x42, 0xf0, 0xae, 0xb3, 0x78, 0x1d]),
            entries_lba: 2,
            num_entries,
            entry_size: 128,
            array_crc32: 0,
            padding: [0u8; 420],
        }
    }

    fn gapped_entries() -> Vec<PartitionEntry> {
        let mut entries = alloc::vec![PartitionEntry::UNUSED; 128];
        entries[0] = entry(34, 1000, "boot", 1);
        entries[1] = entry(1001, 1500, "root", 2);
        entries[127] = entry(1501, 2014, "data", 3);
        entries
    }

    #[test]
    fn enumeration_crosses_gaps() {
        let entries = gapped_entries();
        let parts: Vec<_> = enumerate(&entries)
            .map(|p| (p.number, p.first_lba(), p.last_lba()))
            .collect();
        assert_eq!(parts, alloc::vec![(1, 34, 1000), (2, 1001, 1500), (128, 1501, 2014)]);
    }

    #[test]
    fn enumeration_uses_type_guid_only() {
        let mut entries = alloc::vec![PartitionEntry::UNUSED; 4];
        // typed, zero LBAs: used
        entries[1] = entry(0, 0, "zero", 9);
        // nil type, non-zero LBAs: unused
        entries[2] = entry(10, 20, "ghost", 8);
        entries[2].type_guid = Guid::NIL;

        let numbers: Vec<u32> = enumerate(&entries).map(|p| p.number).collect();
        assert_eq!(numbers, alloc::vec![2]);
    }

    #[test]
    fn assemble_rejects_bad_signature() {
        let mut h = header(128);
        h.signature[0] = b'X';
        assert_eq!(
            GuidPartitionTable::assemble(h, gapped_entries()),
            Err(GptError::NoGptFound)
        );
    }

    #[test]
    fn accessors() {
        let t = GuidPartitionTable::assemble(header(128).with_computed_crc32(), gapped_entries()).unwrap();
        assert_eq!(t.disk_uuid().to_string(), "d0f2f537-fdf7-41ad-acb9-42f0aeb3781d");
        assert_eq!(t.header_size(), 92);
        assert_eq!(t.first_usable_lba(), 34);
        assert_eq!(t.last_usable_lba(), 4062);
        assert_eq!(t.entries_lba(), 2);
        assert_eq!(t.entry_size(), 128);
        assert_eq!(t.entries().len(), 128);
        assert_eq!(t.used_count(), 3);
        assert!(t.check_signature());
        assert!(t.check_crc32());

        let p = t.partition(128).unwrap();
        assert_eq!(p.name(), "data");
        assert_eq!(p.kind(), PartitionKind::LINUX_FS);
        assert_eq!(p.unique_guid(), Guid::from_fields(3, 0, 0, [3; 8]));
        assert!(t.partition(3).is_none());
        assert!(t.partition(0).is_none());
        assert!(t.partition(129).is_none());
    }

    #[test]
    fn entries_crc32() {
        let entries = gapped_entries();
        let mut h = header(128);
        let mut raw = Vec::new();
        for e in &entries {
            raw.extend_from_slice(&e.encode());
        }
        h.array_crc32 = crc32fast::hash(&raw);
        let h = h.with_computed_crc32();

        let t = GuidPartitionTable::assemble(h, entries).unwrap();
        assert_eq!(t.calculate_entries_crc32(), h.array_crc32);
        assert!(t.check_entries_crc32());
        assert!(t.verify_crc32().is_ok());

        let mut stale = h;
        stale.array_crc32 ^= 1;
        let stale = stale.with_computed_crc32();
        let t = GuidPartitionTable::assemble(stale, gapped_entries()).unwrap();
        assert!(t.check_crc32());
        assert!(!t.check_entries_crc32());
        assert!(matches!(
            t.verify_crc32(),
            Err(GptError::ChecksumMismatch {
                region: "partition entry array",
                ..
            })
        ));
    }

    #[test]
    fn raw_assembly_keeps_wide_records() {
        let mut h = header(2);
        h.entry_size = 256;
        let mut raw = alloc::vec![0u8; 2 * 256];
        raw[..128].copy_from_slice(&entry(34, 99, "a", 1).encode());
        raw[200] = 0x42;
        h.array_crc32 = crc32fast::hash(&raw);

        let t = GuidPartitionTable::assemble_from_raw(h, raw, 2, 256).unwrap();
        assert!(t.check_entries_crc32());
        assert_eq!(t.used_count(), 1);
    }
}
