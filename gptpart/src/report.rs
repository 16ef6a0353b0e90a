// SPDX-License-Identifier: MIT

//! Human-readable rendering of a header and of an assembled table.

use core::fmt;

use alloc::string::{String, ToString};

use crate::guids::PartitionKind;
use crate::header::GptHeader;
use crate::table::GuidPartitionTable;

impl fmt::Display for GptHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== GPT Header ===")?;
        writeln!(f, "Disk UUID:                    {}", self.disk_guid)?;
        writeln!(f, "Header Checksum CRC32:        {:#010x}", self.header_crc32)?;
        writeln!(f, "Header Size:                  {}", self.header_size)?;
        writeln!(f, "First Usable LBA:             {}", self.first_usable_lba)?;
        writeln!(f, "Last Usable LBA:              {}", self.last_usable_lba)?;
        writeln!(f, "Partition Entries Start LBA:  {}", self.entries_lba)?;
        writeln!(f, "Partition Entry Size:         {}", self.entry_size)?;
        writeln!(f, "==================")
    }
}

impl fmt::Display for GuidPartitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())?;

        writeln!(
            f,
            "  ┌─────┬──────────────────────────────────────┬──────────────┬──────────────┬──────────────────────────────────────┬──────────────────────────────┐"
        )?;
        writeln!(
            f,
            "  | No. | Unique GUID                          | Start (LBA)  | End (LBA)    | Type                                 | Name                         |"
        )?;
        writeln!(
            f,
            "  ├─────┼──────────────────────────────────────┼──────────────┼──────────────┼──────────────────────────────────────┼──────────────────────────────┤"
        )?;

        for p in self.partitions() {
            writeln!(
                f,
                "  | {:>3} | {:<36} | {:>12} | {:>12} | {:<36} | {:<28} |",
                p.number,
                p.unique_guid(),
                sep_u64(p.first_lba()),
                sep_u64(p.last_lba()),
                type_label(p.kind()),
                truncate(&p.name(), 28),
            )?;
        }

        writeln!(
            f,
            "  └─────┴──────────────────────────────────────┴──────────────┴──────────────┴──────────────────────────────────────┴──────────────────────────────┘"
        )
    }
}

/// Registry name, or the type GUID itself when it is not registered.
fn type_label(kind: PartitionKind) -> String {
    match kind {
        PartitionKind::Unknown(guid) => guid.to_string(),
        known => known.to_string(),
    }
}

/// At most `max` chars of `s`.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn sep_u64(n: u64) -> String {
    // thin thousands separator: 12 345 678
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    use crate::entry::{PartitionEntry, encode_gpt_name};
    use crate::guid::Guid;
    use crate::guids::{GPT_PARTITION_TYPE_ESP, GPT_PARTITION_TYPE_WIN_RECOVERY};
    use crate::header::{GPT_REVISION, GPT_SIGNATURE};

    fn table() -> GuidPartitionTable {
        let header = GptHeader {
            signature: *GPT_SIGNATURE,
            revision: GPT_REVISION,
            header_size: 92,
            header_crc32: 0x1234_abcd,
            reserved: 0,
            current_lba: 1,
            backup_lba: 4095,
            first_usable_lba: 34,
            last_usable_lba: 4062,
            disk_guid: Guid::from_fields(0x17b4_9718, 0xe953, 0x4465, [0x8e, 0xba, 0x0b, 0x6c, 0xa1, 0x5d, 0x0e, 0xbd]),
            entries_lba: 2,
            num_entries: 5,
            entry_size: 128,
            array_crc32: 0,
            padding: [0u8; 420],
        };
        let mut entries = vec![PartitionEntry::UNUSED; 5];
        entries[2] = PartitionEntry {
            type_guid: GPT_PARTITION_TYPE_ESP,
            unique_guid: Guid::from_fields(0xd0f2_f537, 0xfdf7, 0x41ad, [0xac, 0xb9, 0x42, 0xf0, 0xae, 0xb3, 0x78, 0x1d]),
            first_lba: 2048,
            last_lba: 1_050_623,
            flags: 0,
            name: encode_gpt_name("EFI system partition"),
        };
        entries[3] = PartitionEntry {
            type_guid: GPT_PARTITION_TYPE_WIN_RECOVERY,
            first_lba: 1_050_624,
            last_lba: 2_000_000,
            name: encode_gpt_name("Recovery"),
            ..entries[2]
        };
        entries[4] = PartitionEntry {
            type_guid: Guid::from_fields(0x1234_5678, 0x9abc, 0xdef0, [0x11; 8]),
            first_lba: 2_000_001,
            last_lba: 3_000_000,
            name: encode_gpt_name("vendor"),
            ..entries[2]
        };
        GuidPartitionTable::assemble(header, entries).unwrap()
    }

    #[test]
    fn header_report() {
        let s = table().header().to_string();
        assert!(s.starts_with("=== GPT Header ===\n"));
        assert!(s.contains("Disk UUID:                    17b49718-e953-4465-8eba-0b6ca15d0ebd\n"));
        assert!(s.contains("Header Checksum CRC32:        0x1234abcd\n"));
        assert!(s.contains("Partition Entry Size:         128\n"));
    }

    #[test]
    fn table_report_lists_used_rows_only() {
        let s = table().to_string();
        let rows: alloc::vec::Vec<&str> = s.lines().filter(|l| l.starts_with("  | ")).collect();
        // column titles + three partitions
        assert_eq!(rows.len(), 4);
        assert!(rows[1].starts_with("  |   3 | d0f2f537-fdf7-41ad-acb9-42f0aeb3781d |"));
        assert!(rows[1].contains("2 048"));
        assert!(rows[1].contains("1 050 623"));
        assert!(rows[1].contains("EFI System Partition"));
        assert!(rows[1].contains("EFI system partition"));
        assert!(rows[2].contains("| Windows Recovery Environment         |"));
        assert!(rows[3].contains("| 12345678-9abc-def0-1111-111111111111 | vendor"));
        // every row has the width of the title row
        let width = rows[0].chars().count();
        assert!(rows.iter().all(|r| r.chars().count() == width));
    }

    #[test]
    fn helpers() {
        assert_eq!(sep_u64(0), "0");
        assert_eq!(sep_u64(999), "999");
        assert_eq!(sep_u64(1000), "1 000");
        assert_eq!(sep_u64(12_345_678), "12 345 678");
        assert_eq!(truncate("système", 3), "sys");
        assert_eq!(truncate("sy", 3), "sy");
    }
}
