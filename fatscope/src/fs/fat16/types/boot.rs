// SPDX-License-Identifier: MIT

use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::fs::fat16::constant::*;

/// FAT16 boot sector: BIOS parameter block, extended BPB, boot code.
///
/// Multi-byte fields are stored little-endian, so the overlay is valid on any
/// host and needs no alignment.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C)]
pub struct Fat16BootSector {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],          // 0x03
    pub bytes_per_sector: U16,      // 0x0B
    pub sectors_per_cluster: u8,    // 0x0D
    pub reserved_sectors: U16,      // 0x0E
    pub num_fats: u8,               // 0x10
    pub root_entry_count: U16,      // 0x11
    pub total_sectors_16: U16,      // 0x13
    pub media: u8,                  // 0x15
    pub fat_size_16: U16,           // 0x16
    pub sectors_per_track: U16,     // 0x18
    pub num_heads: U16,             // 0x1A
    pub hidden_sectors: U32,        // 0x1C
    pub total_sectors_32: U32,      // 0x20

    // FAT12/16 Extended BPB
    pub drive_number: u8,           // 0x24
    pub reserved1: u8,              // 0x25
    pub boot_signature: u8,         // 0x26
    pub volume_id: U32,             // 0x27
    pub volume_label: [u8; 11],     // 0x2B
    pub fs_type: [u8; 8],           // 0x36

    pub boot_code: [u8; FAT_BOOT_CODE_SIZE],
    pub signature: [u8; 2],
}

impl Default for Fat16BootSector {
    fn default() -> Self {
        Self::new_zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{offset_of, size_of};

    #[test]
    fn test_layout_matches_disk_offsets() {
        assert_eq!(size_of::<Fat16BootSector>(), FAT_BOOT_SECTOR_SIZE);
        assert_eq!(offset_of!(Fat16BootSector, bytes_per_sector), 0x0B);
        assert_eq!(offset_of!(Fat16BootSector, fat_size_16), 0x16);
        assert_eq!(offset_of!(Fat16BootSector, total_sectors_32), 0x20);
        assert_eq!(offset_of!(Fat16BootSector, drive_number), 0x24);
        assert_eq!(offset_of!(Fat16BootSector, volume_id), 0x27);
        assert_eq!(offset_of!(Fat16BootSector, volume_label), 0x2B);
        assert_eq!(offset_of!(Fat16BootSector, fs_type), 0x36);
        assert_eq!(offset_of!(Fat16BootSector, signature), 0x1FE);
    }

    #[test]
    fn test_fields_are_little_endian() {
        let mut raw = [0u8; FAT_BOOT_SECTOR_SIZE];
        raw[0x0B] = 0x00;
        raw[0x0C] = 0x02;
        raw[0x27..0x2B].copy_from_slice(&[0x78, 0x56, 0x34, 0x12]);

        let bs = Fat16BootSector::read_from_bytes(&raw).expect("exact size");
        assert_eq!(bs.bytes_per_sector.get(), 512);
        assert_eq!(bs.volume_id.get(), 0x1234_5678);
    }
}
