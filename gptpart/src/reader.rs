// SPDX-License-Identifier: MIT

//! Read pipeline: header block, signature gate, entry array, assembly.

use alloc::vec::Vec;

use gptio::prelude::*;
use log::{debug, warn};

use crate::{
    DEFAULT_SECTOR_SIZE,
    errors::*,
    header::GptHeader,
    io_ext::{ByteReaderLbaExt, lba_offset},
    layout::{ENTRY_SIZE, HEADER_BLOCK_SIZE},
    table::GuidPartitionTable,
};

pub const GPT_PRIMARY_HEADER_LBA: u64 = 1;
pub const GPT_DEFAULT_NUM_ENTRIES: usize = 128;

/// Options for reading a GPT.
///
/// CRC verification is not one of them: it stays an explicit query on
/// the returned table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    /// Logical sector (LBA) size in bytes
    pub sector_size: u64,
    /// Largest declared entry count taken at face value
    pub max_entries: u32,
    /// Largest declared entry size taken at face value
    pub max_entry_size: u32,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            sector_size: DEFAULT_SECTOR_SIZE,
            max_entries: 16_384,
            max_entry_size: 4096,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sector_size(mut self, sz: u64) -> Self {
        self.sector_size = sz;
        self
    }

    pub fn with_max_entries(mut self, n: u32) -> Self {
        self.max_entries = n;
        self
    }

    pub fn with_max_entry_size(mut self, sz: u32) -> Self {
        self.max_entry_size = sz;
        self
    }

    fn validate(&self) -> GptResult {
        if self.sector_size < HEADER_BLOCK_SIZE as u64 || !self.sector_size.is_power_of_two() {
            return Err(GptError::Invalid(
                "GPT: sector_size must be a power of two >= 512",
            ));
        }
        Ok(())
    }

    /// Entry count and size to read: the declared ones when plausible,
    /// 128 x 128 otherwise.
    pub fn entry_geometry(&self, header: &GptHeader) -> (usize, usize) {
        let ne = header.num_entries;
        let es = header.entry_size;
        let plausible = ne > 0
            && ne <= self.max_entries
            && es as usize >= ENTRY_SIZE
            && es <= self.max_entry_size
            && es % 8 == 0;
        if plausible {
            (ne as usize, es as usize)
        } else {
            warn!(
                "GPT: implausible entry geometry ({ne} x {es} bytes), using {GPT_DEFAULT_NUM_ENTRIES} x {ENTRY_SIZE}"
            );
            (GPT_DEFAULT_NUM_ENTRIES, ENTRY_SIZE)
        }
    }
}

/// Reads and decodes the primary header (LBA 1), gated on its signature.
pub fn read_header<R: ByteReader + ?Sized>(io: &mut R, opts: &ReadOptions) -> GptResult<GptHeader> {
    opts.validate()?;

    let bytes =
        io.read_vec_available_lba(GPT_PRIMARY_HEADER_LBA, opts.sector_size, HEADER_BLOCK_SIZE)?;
    let header = GptHeader::decode(&bytes)?;

    if !header.check_signature() {
        debug!("GPT: no signature at LBA {GPT_PRIMARY_HEADER_LBA}");
        return Err(GptError::NoGptFound);
    }

    debug!(
        "GPT: header rev {:#010x}, size {}, entries {} x {} at LBA {}",
        header.revision, header.header_size, header.num_entries, header.entry_size, header.entries_lba
    );
    Ok(header)
}

/// Full pipeline: header, signature gate, entry array, assembly.
///
/// No CRC is checked here; see [`GuidPartitionTable::check_crc32`].
pub fn read_gpt<R: ByteReader + ?Sized>(
    io: &mut R,
    opts: &ReadOptions,
) -> GptResult<GuidPartitionTable> {
    let header = read_header(io, opts)?;

    let (count, entry_size) = opts.entry_geometry(&header);
    let len = count * entry_size;

    // An array offset past u64 lies beyond any source: nothing is available.
    let raw = match lba_offset(header.entries_lba, opts.sector_size) {
        Ok(offset) => {
            let want = match io.size_hint() {
                Some(size) => {
                    let left = size.saturating_sub(offset);
                    len.min(usize::try_from(left).unwrap_or(usize::MAX))
                }
                None => len,
            };
            match io.read_vec_available(offset, want) {
                Err(IoError::Overflow) => Vec::new(),
                r => r?,
            }
        }
        Err(_) => Vec::new(),
    };

    GuidPartitionTable::assemble_from_raw(header, raw, count, entry_size)
}

/// Pipeline over a whole-disk image already in memory.
#[cfg(feature = "mem")]
pub fn read_gpt_from_bytes(bytes: &[u8], opts: &ReadOptions) -> GptResult<GuidPartitionTable> {
    let mut io = MemReader::new(bytes);
    read_gpt(&mut io, opts)
}

/// Opens `path` read-only and runs the pipeline. The file is closed on
/// every return path.
#[cfg(feature = "std")]
pub fn read_gpt_from_path<P: AsRef<std::path::Path>>(
    path: P,
    opts: &ReadOptions,
) -> GptResult<GuidPartitionTable> {
    let mut io = FileReader::open(path)?;
    read_gpt(&mut io, opts)
}
