// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::core::{errors::*, utils::region::clamped};
use crate::fs::fat16::{
    anomaly::{Anomaly, Region, Severity},
    fat::{FatSummary, FatTable},
    report::ReportDisplay,
    volume::Volume,
    walker::{DirectoryTree, DirectoryTreeWalker, WalkOptions},
};

/// Everything decoded from one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inspection {
    pub volume: Volume,
    pub fat: FatSummary,
    pub tree: DirectoryTree,
    /// Findings about the layout itself, e.g. a FAT cut by the end of the image.
    pub anomalies: Vec<Anomaly>,
}

impl Inspection {
    pub fn report(&self) -> ReportDisplay<'_> {
        ReportDisplay::new(self)
    }

    /// Volume findings first, then every directory in walk order.
    pub fn all_anomalies(&self) -> impl Iterator<Item = &Anomaly> {
        self.anomalies
            .iter()
            .chain(self.tree.iter_depth_first().flat_map(|n| n.anomalies.iter()))
    }

    pub fn count(&self, sev: Severity) -> usize {
        self.all_anomalies().filter(|a| a.severity() == sev).count()
    }

    pub fn has_error(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

/// Runs the full decode with default options.
pub fn inspect(image: &[u8]) -> FsResult<Inspection> {
    inspect_with(image, WalkOptions::default())
}

/// Only a bad boot sector is fatal; everything past it ends up as anomalies.
pub fn inspect_with(image: &[u8], opts: WalkOptions) -> FsResult<Inspection> {
    let volume = Volume::parse(image)?;
    let mut anomalies = Vec::new();

    if volume.sectors_per_cluster == 0 {
        anomalies.push(Anomaly::ZeroClusterSize);
    }

    let fat_bytes = clamped(image, volume.fat_start, volume.fat_size_bytes);
    if (fat_bytes.len() as u64) < volume.fat_size_bytes {
        anomalies.push(Anomaly::TruncatedRegion {
            region: Region::Fat,
            expected: volume.fat_size_bytes,
            available: fat_bytes.len() as u64,
        });
    }
    let fat = FatTable::new(fat_bytes);

    let tree = DirectoryTreeWalker::new(&volume, fat, image)
        .with_options(opts)
        .walk();

    Ok(Inspection {
        fat: fat.summary(),
        volume,
        tree,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::fat16::types::Fat16BootSector;
    use zerocopy::IntoBytes;
    use zerocopy::byteorder::little_endian::U16;

    fn image(fat_sectors: u16) -> Vec<u8> {
        image_with_clusters(fat_sectors, 1)
    }

    fn image_with_clusters(fat_sectors: u16, spc: u8) -> Vec<u8> {
        let mut bs = Fat16BootSector::default();
        bs.bytes_per_sector = U16::new(512);
        bs.sectors_per_cluster = spc;
        bs.reserved_sectors = U16::new(1);
        bs.num_fats = 2;
        bs.root_entry_count = U16::new(16);
        bs.fat_size_16 = U16::new(fat_sectors);
        let mut img = vec![0u8; 4096];
        img[..512].copy_from_slice(bs.as_bytes());
        img
    }

    #[test]
    fn test_boot_sector_errors_are_fatal() {
        assert_eq!(
            inspect(&[0u8; 100]),
            Err(FsError::Format(FormatError::Truncated { len: 100 }))
        );
        assert!(matches!(
            inspect(&[0u8; 512]),
            Err(FsError::Format(FormatError::InvalidGeometry(_)))
        ));
    }

    #[test]
    fn test_empty_volume() {
        let insp = inspect(&image(1)).expect("valid image");
        assert!(insp.anomalies.is_empty());
        assert_eq!(insp.fat.entry_count, 256);
        assert!(insp.fat.chains.is_empty());
        assert_eq!(insp.tree.len(), 1);
        assert!(!insp.has_error());
    }

    #[test]
    fn test_fat_past_end_of_image() {
        // FAT copies of 64 sectors each, image only 4096 bytes long
        let insp = inspect(&image(64)).expect("boot sector is fine");
        assert_eq!(
            insp.anomalies,
            [Anomaly::TruncatedRegion {
                region: Region::Fat,
                expected: 64 * 512,
                available: 4096 - 512,
            }]
        );
        // the root region lies entirely outside the image
        assert_eq!(insp.tree.root().anomalies.len(), 1);
        assert_eq!(insp.count(Severity::Error), 2);
    }

    #[test]
    fn test_zero_cluster_size_is_reported() {
        let mut img = image_with_clusters(1, 0);
        // root entry for a subdirectory at cluster 2
        img[1536..1544].copy_from_slice(b"SUB     ");
        img[1544..1547].copy_from_slice(b"   ");
        img[1547] = 0x10;
        img[1562] = 2;
        img[512 + 4..512 + 6].copy_from_slice(&0xFFFFu16.to_le_bytes());

        let insp = inspect(&img).expect("boot sector is fine");
        assert_eq!(insp.anomalies, [Anomaly::ZeroClusterSize]);
        assert_eq!(insp.count(Severity::Warn), 1);

        let child = insp.tree.get(insp.tree.root().children[0]).expect("child node");
        assert_eq!(child.size_bytes, 0);
        assert!(child.entries.is_empty());
        assert!(child.anomalies.is_empty());
    }
}
