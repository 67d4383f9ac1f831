// SPDX-License-Identifier: MIT

// === Boot Sector ===

pub const FAT_BOOT_SECTOR_SIZE: usize = 512;
pub const FAT_BOOT_CODE_SIZE: usize = 448;
pub const FAT_SIGNATURE: [u8; 2] = [0x55, 0xAA];
pub const FAT_EXTENDED_BOOT_SIGNATURE: u8 = 0x29; // BS_BootSig

// === FAT Region ===

pub const FAT_ENTRY_SIZE: usize = 2;
pub const FAT_FIRST_CLUSTER: u16 = 2;
pub const FAT_FREE: u16 = 0x0000;
pub const FAT_EOC_MIN: u16 = 0xFFF8;
pub const FAT_MAX_ENTRIES: usize = 0x1_0000;

// === Directory Entries ===

pub const FAT_DIR_ENTRY_SIZE: usize = 32;
pub const FAT_EOD: u8 = 0x00;
pub const FAT_ENTRY_DELETED: u8 = 0xE5;
pub const FAT_DOT_NAME: &[u8; 11] = b".          ";
pub const FAT_DOTDOT_NAME: &[u8; 11] = b"..         ";

// === Walker ===

pub const FAT_DEFAULT_MAX_DEPTH: usize = 256;
