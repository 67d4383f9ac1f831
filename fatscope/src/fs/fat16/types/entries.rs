// SPDX-License-Identifier: MIT

use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::fs::fat16::{attr::Fat16Attributes, constant::*};

/// 32-byte short-name directory record as stored on disk.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C)]
pub struct Fat16DirEntry {
    pub name: [u8; 8],
    pub ext: [u8; 3],
    pub attr: u8,
    pub nt_reserved: u8,
    pub creation_time_tenth: u8,
    pub creation_time: U16,
    pub creation_date: U16,
    pub access_date: U16,
    pub first_cluster_high: U16, // always zero on FAT16
    pub write_time: U16,
    pub write_date: U16,
    pub first_cluster: U16,
    pub file_size: U32,
}

impl Fat16DirEntry {
    pub fn new(name: [u8; 8], ext: [u8; 3], attr: u8, cluster: u16, size: u32) -> Self {
        Self {
            name,
            ext,
            attr,
            first_cluster: U16::new(cluster),
            file_size: U32::new(size),
            ..Self::new_zeroed()
        }
    }

    #[inline]
    pub fn attributes(&self) -> Fat16Attributes {
        Fat16Attributes::from_raw(self.attr)
    }

    #[inline]
    pub fn is_dot_or_dotdot(&self) -> bool {
        let mut full = [0u8; 11];
        full[..8].copy_from_slice(&self.name);
        full[8..].copy_from_slice(&self.ext);
        &full == FAT_DOT_NAME || &full == FAT_DOTDOT_NAME
    }
}
