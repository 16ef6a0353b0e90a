// SPDX-License-Identifier: MIT

//! GPT GUID codec.
//!
//! GPT stores the first three GUID fields (4 + 2 + 2 bytes) little-endian,
//! while the canonical RFC 4122 form writes them big-endian. The trailing
//! 8 bytes are stored in canonical order already. This quirk is handled
//! here and nowhere else.

use core::fmt;

use uuid::Uuid;

/// A GUID as laid out in GPT structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Guid {
    pub time_low: u32,
    pub time_mid: u16,
    pub time_hi_and_version: u16,
    /// Clock sequence and node, in on-disk (= canonical) byte order.
    pub clock_seq_and_node: [u8; 8],
}

impl Guid {
    /// The all-zero GUID, marker of an unused partition slot.
    pub const NIL: Guid = Guid::from_fields(0, 0, 0, [0; 8]);

    pub const fn from_fields(
        time_low: u32,
        time_mid: u16,
        time_hi_and_version: u16,
        clock_seq_and_node: [u8; 8],
    ) -> Self {
        Self {
            time_low,
            time_mid,
            time_hi_and_version,
            clock_seq_and_node,
        }
    }

    /// Decodes the 16 on-disk bytes of a GPT GUID.
    pub const fn from_disk_bytes(b: &[u8; 16]) -> Self {
        Self {
            time_low: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            time_mid: u16::from_le_bytes([b[4], b[5]]),
            time_hi_and_version: u16::from_le_bytes([b[6], b[7]]),
            clock_seq_and_node: [b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]],
        }
    }

    /// Encodes back to the 16 on-disk bytes.
    pub fn to_disk_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.time_low.to_le_bytes());
        out[4..6].copy_from_slice(&self.time_mid.to_le_bytes());
        out[6..8].copy_from_slice(&self.time_hi_and_version.to_le_bytes());
        out[8..16].copy_from_slice(&self.clock_seq_and_node);
        out
    }

    /// The 16 canonical (RFC 4122) bytes.
    pub fn canonical_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.time_low.to_be_bytes());
        out[4..6].copy_from_slice(&self.time_mid.to_be_bytes());
        out[6..8].copy_from_slice(&self.time_hi_and_version.to_be_bytes());
        out[8..16].copy_from_slice(&self.clock_seq_and_node);
        out
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        self.canonical_bytes().iter().all(|&b| b == 0)
    }

    #[inline]
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.canonical_bytes())
    }
}

impl From<Guid> for Uuid {
    fn from(g: Guid) -> Self {
        g.to_uuid()
    }
}

impl fmt::Display for Guid {
    /// Lowercase hyphenated form, e.g. `17b49718-e953-4465-8eba-0b6ca15d0ebd`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_uuid().hyphenated(), f)
    }
}
