// SPDX-License-Identifier: MIT

use crate::define_partition_types;
use crate::guid::Guid;

define_partition_types! {
    ESP => "EFI System Partition",
        Guid::from_fields(0xC12A7328, 0xF81F, 0x11D2, [0xBA, 0x4B, 0x00, 0xA0, 0xC9, 0x3E, 0xC9, 0x3B]),
    BIOS_BOOT => "BIOS Boot Partition",
        Guid::from_fields(0x21686148, 0x6449, 0x6E6F, [0x74, 0x4E, 0x65, 0x65, 0x64, 0x45, 0x46, 0x49]),
    MS_RESERVED => "Microsoft Reserved",
        Guid::from_fields(0xE3C9E316, 0x0B5C, 0x4DB8, [0x81, 0x7D, 0xF9, 0x2D, 0xF0, 0x02, 0x15, 0xAE]),
    MS_BASIC_DATA => "Microsoft Basic Data",
        Guid::from_fields(0xEBD0A0A2, 0xB9E5, 0x4433, [0x87, 0xC0, 0x68, 0xB6, 0xB7, 0x26, 0x99, 0xC7]),
    WIN_RECOVERY => "Windows Recovery Environment",
        Guid::from_fields(0xDE94BBA4, 0x06D1, 0x4D40, [0xA1, 0x6A, 0xBF, 0xD5, 0x01, 0x79, 0xD6, 0xAC]),
    LINUX_FS => "Linux Filesystem",
        Guid::from_fields(0x0FC63DAF, 0x8483, 0x4772, [0x8E, 0x79, 0x3D, 0x69, 0xD8, 0x47, 0x7D, 0xE4]),
    LINUX_SWAP => "Linux Swap",
        Guid::from_fields(0x0657FD6D, 0xA4AB, 0x43C4, [0x84, 0xE5, 0x09, 0x33, 0xC8, 0x4B, 0x4F, 0x4F]),
    LINUX_LVM => "Linux LVM",
        Guid::from_fields(0xE6D6D379, 0xF507, 0x44C2, [0xA2, 0x3C, 0x23, 0x8F, 0x2A, 0x3D, 0xF9, 0x28]),
    LINUX_RAID => "Linux RAID",
        Guid::from_fields(0xA19D880F, 0x05FC, 0x4D3B, [0xA0, 0x06, 0x74, 0x3F, 0x0F, 0x84, 0x91, 0x1E]),
    LINUX_ROOT_X86_64 => "Linux Root (x86-64)",
        Guid::from_fields(0x4F68BCE3, 0xE8CD, 0x4DB1, [0x96, 0xE7, 0xFB, 0xCA, 0xF9, 0x84, 0xB7, 0x09]),
    LINUX_HOME => "Linux Home",
        Guid::from_fields(0x933AC7E1, 0x2EB4, 0x4F13, [0xB8, 0x44, 0x0E, 0x14, 0xE2, 0xAE, 0xF9, 0x15]),
    APPLE_HFS => "Apple HFS+",
        Guid::from_fields(0x48465300, 0x0000, 0x11AA, [0xAA, 0x11, 0x00, 0x30, 0x65, 0x43, 0xEC, 0xAC]),
    APPLE_APFS => "Apple APFS",
        Guid::from_fields(0x7C3457EF, 0x0000, 0x11AA, [0xAA, 0x11, 0x00, 0x30, 0x65, 0x43, 0xEC, 0xAC]),
}
