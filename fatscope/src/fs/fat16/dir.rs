// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use zerocopy::FromBytes;

use crate::core::errors::DecodingError;
use crate::fs::fat16::{
    attr::Fat16Attributes, constant::*, types::Fat16DirEntry, volume::FixedText, volume::Volume,
};

/// What a 32-byte record represents. Decided once per record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// First byte 0x00. Ends the listing and is never emitted.
    EndOfDirectory,
    Deleted,
    Subdirectory,
    /// `.` or `..` inside a subdirectory.
    SelfOrParent,
    VolumeLabel,
    RegularFile,
}

impl EntryKind {
    pub fn classify(raw: &Fat16DirEntry) -> Self {
        let attr = raw.attributes();
        match raw.name[0] {
            FAT_EOD => EntryKind::EndOfDirectory,
            FAT_ENTRY_DELETED => EntryKind::Deleted,
            _ if attr.is_dir() && raw.is_dot_or_dotdot() => EntryKind::SelfOrParent,
            _ if attr.is_dir() => EntryKind::Subdirectory,
            _ if attr.is_volume_id() => EntryKind::VolumeLabel,
            _ => EntryKind::RegularFile,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Slot number inside the region.
    pub index: usize,
    pub name_raw: FixedText<8>,
    pub ext_raw: FixedText<3>,
    pub attributes: Fat16Attributes,
    pub first_cluster: u16,
    pub size_bytes: u32,
    pub kind: EntryKind,
    /// `None` for deleted entries and for cluster 1.
    pub start_sector: Option<u64>,
}

impl DirectoryEntry {
    fn decode(index: usize, raw: &Fat16DirEntry, kind: EntryKind, volume: &Volume) -> Self {
        let first_cluster = raw.first_cluster.get();
        let start_sector = match kind {
            EntryKind::Deleted => None,
            _ => volume.cluster_start_sector(first_cluster),
        };
        Self {
            index,
            name_raw: FixedText(raw.name),
            ext_raw: FixedText(raw.ext),
            attributes: raw.attributes(),
            first_cluster,
            size_bytes: raw.file_size.get(),
            kind,
            start_sector,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.kind == EntryKind::Deleted
    }

    #[inline]
    pub fn is_subdirectory(&self) -> bool {
        self.kind == EntryKind::Subdirectory
    }
}

/// Entries decoded from one region, in on-disk order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub entries: Vec<DirectoryEntry>,
    /// Set when the region ended inside a record.
    pub error: Option<DecodingError>,
}

impl DirectoryListing {
    /// Entries minus deleted slots.
    pub fn active(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.iter().filter(|e| !e.is_deleted())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decodes `region` as consecutive 32-byte records until the end-of-directory
/// marker or the end of the region.
pub fn read_directory(region: &[u8], volume: &Volume) -> DirectoryListing {
    let mut listing = DirectoryListing::default();
    let mut chunks = region.chunks_exact(FAT_DIR_ENTRY_SIZE);

    for (index, chunk) in chunks.by_ref().enumerate() {
        let Ok(raw) = Fat16DirEntry::ref_from_bytes(chunk) else {
            break;
        };
        let kind = EntryKind::classify(raw);
        if kind == EntryKind::EndOfDirectory {
            return listing;
        }
        listing
            .entries
            .push(DirectoryEntry::decode(index, raw, kind, volume));
    }

    let remaining = chunks.remainder().len();
    if remaining != 0 {
        listing.error = Some(DecodingError {
            offset: region.len() - remaining,
            remaining,
        });
    }
    listing
}
