// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

//! Read-only GUID Partition Table decoding and validation.
//!
//! ```no_run
//! use gptpart::prelude::*;
//!
//! let table = read_gpt_from_path("disk.img", &ReadOptions::default())?;
//! if !table.check_crc32() {
//!     eprintln!("stale header checksum");
//! }
//! for p in table.partitions() {
//!     println!("{} {} {}..{} {}", p.number, p.unique_uuid(), p.first_lba(), p.last_lba(), p.name());
//! }
//! # Ok::<(), gptpart::errors::GptError>(())
//! ```

extern crate alloc;

#[doc(hidden)]
pub use paste as __paste;

#[macro_use]
mod macros;
mod io_ext;
mod report;

pub mod entry;
pub mod errors;
/// GPT GUID codec (mixed-endian on-disk form <-> canonical UUID).
pub mod guid;
/// Common Partition Type GUIDs.
pub mod guids;
pub mod header;
/// Field offsets shared by decoders and serializer.
pub mod layout;
/// Master Boot Record (MBR) and Protective MBR inspection.
pub mod mbr;
pub mod reader;
pub mod table;

pub use io_ext::ByteReaderLbaExt;
pub use reader::{ReadOptions, read_gpt, read_header};
#[cfg(feature = "mem")]
pub use reader::read_gpt_from_bytes;
#[cfg(feature = "std")]
pub use reader::read_gpt_from_path;

pub const DEFAULT_SECTOR_SIZE: u64 = 512;

pub mod prelude {
    pub use crate::entry::{GptAttributes, PartitionEntry};
    pub use crate::errors::*;
    pub use crate::guid::Guid;
    pub use crate::guids::PartitionKind;
    pub use crate::header::GptHeader;
    pub use crate::mbr::{Mbr, MbrKind, probe_mbr, read_mbr};
    pub use crate::reader::{ReadOptions, read_gpt, read_header};
    #[cfg(feature = "mem")]
    pub use crate::reader::read_gpt_from_bytes;
    #[cfg(feature = "std")]
    pub use crate::reader::read_gpt_from_path;
    pub use crate::table::{GuidPartitionTable, Partition, enumerate};
}
