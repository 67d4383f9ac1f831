// SPDX-License-Identifier: MIT

use core::fmt;

use zerocopy::FromBytes;

use crate::core::errors::*;
use crate::fs::fat16::{constant::*, types::Fat16BootSector};

/// Fixed-width text field from the boot sector or a directory entry.
///
/// The bytes are kept exactly as stored; volumes routinely pad these fields
/// with non-ASCII filler, so nothing is validated. `Display` escapes bytes
/// outside printable ASCII as `\xNN`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedText<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedText<N> {
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Text with trailing space padding removed.
    pub fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
        &self.0[..end]
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if (0x20..0x7F).contains(&b) {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Geometry and layout of a FAT16 volume, decoded once from the boot sector.
///
/// All derived offsets are absolute byte offsets into the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub oem_name: FixedText<8>,
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub max_root_entries: u16,
    /// 16-bit count, or the 32-bit one when the former is zero.
    pub total_sectors: u32,
    pub media_descriptor: u8,
    pub sectors_per_fat: u16,
    pub sectors_per_track: u16,
    pub number_of_heads: u16,
    pub hidden_sectors: u32,
    pub logical_drive_number: u8,
    pub extended_signature: u8,
    pub volume_serial_number: u32,
    pub volume_label: FixedText<11>,
    pub file_system_type: FixedText<8>,
    pub signature: [u8; 2],

    pub fat_start: u64,
    pub fat_size_bytes: u64,
    pub root_directory_start: u64,
    pub root_directory_size_bytes: u64,
    pub data_start: u64,
}

impl Volume {
    /// Decodes the boot sector at the start of `image`.
    pub fn parse(image: &[u8]) -> FormatResult<Self> {
        let (bs, _) = Fat16BootSector::read_from_prefix(image)
            .map_err(|_| FormatError::Truncated { len: image.len() })?;
        Self::from_boot_sector(&bs)
    }

    pub fn from_boot_sector(bs: &Fat16BootSector) -> FormatResult<Self> {
        let bytes_per_sector = bs.bytes_per_sector.get();
        let sectors_per_fat = bs.fat_size_16.get();

        if bytes_per_sector == 0 {
            return Err(FormatError::InvalidGeometry("Bytes per sector is zero"));
        }
        if sectors_per_fat == 0 {
            return Err(FormatError::InvalidGeometry("Sectors per FAT is zero"));
        }
        if bs.num_fats == 0 {
            return Err(FormatError::InvalidGeometry("Number of FATs is zero"));
        }

        let total_sectors = match bs.total_sectors_16.get() {
            0 => bs.total_sectors_32.get(),
            n => n as u32,
        };

        let bps = bytes_per_sector as u64;
        let fat_start = bs.reserved_sectors.get() as u64 * bps;
        let fat_size_bytes = sectors_per_fat as u64 * bps;
        let root_directory_start = fat_start + bs.num_fats as u64 * fat_size_bytes;
        let root_directory_size_bytes = bs.root_entry_count.get() as u64 * FAT_DIR_ENTRY_SIZE as u64;

        Ok(Self {
            oem_name: FixedText(bs.oem_name),
            bytes_per_sector,
            sectors_per_cluster: bs.sectors_per_cluster,
            reserved_sectors: bs.reserved_sectors.get(),
            number_of_fats: bs.num_fats,
            max_root_entries: bs.root_entry_count.get(),
            total_sectors,
            media_descriptor: bs.media,
            sectors_per_fat,
            sectors_per_track: bs.sectors_per_track.get(),
            number_of_heads: bs.num_heads.get(),
            hidden_sectors: bs.hidden_sectors.get(),
            logical_drive_number: bs.drive_number,
            extended_signature: bs.boot_signature,
            volume_serial_number: bs.volume_id.get(),
            volume_label: FixedText(bs.volume_label),
            file_system_type: FixedText(bs.fs_type),
            signature: bs.signature,
            fat_start,
            fat_size_bytes,
            root_directory_start,
            root_directory_size_bytes,
            data_start: root_directory_start + root_directory_size_bytes,
        })
    }

    #[inline]
    pub fn cluster_size_bytes(&self) -> u64 {
        self.bytes_per_sector as u64 * self.sectors_per_cluster as u64
    }

    #[inline]
    pub fn root_directory_start_sector(&self) -> u64 {
        self.root_directory_start / self.bytes_per_sector as u64
    }

    #[inline]
    pub fn data_start_sector(&self) -> u64 {
        self.data_start / self.bytes_per_sector as u64
    }

    /// Byte offset of a data cluster. `None` for the reserved indices 0 and 1.
    pub fn cluster_offset(&self, cluster: u16) -> Option<u64> {
        let n = cluster.checked_sub(FAT_FIRST_CLUSTER)?;
        Some(self.data_start + n as u64 * self.cluster_size_bytes())
    }

    /// First sector an entry's cluster refers to. Cluster 0 means the root
    /// directory region; cluster 1 names no region at all.
    pub fn cluster_start_sector(&self, cluster: u16) -> Option<u64> {
        match cluster {
            0 => Some(self.root_directory_start_sector()),
            c => {
                let n = c.checked_sub(FAT_FIRST_CLUSTER)?;
                Some(self.data_start_sector() + n as u64 * self.sectors_per_cluster as u64)
            }
        }
    }

    pub fn has_boot_signature(&self) -> bool {
        self.signature == FAT_SIGNATURE
    }

    pub fn has_extended_bpb(&self) -> bool {
        self.extended_signature == FAT_EXTENDED_BOOT_SIGNATURE
    }
}
