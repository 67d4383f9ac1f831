// SPDX-License-Identifier: MIT

use core::fmt;

use crate::fs::fat16::{
    anomaly::Anomaly,
    dir::{DirectoryEntry, EntryKind},
    inspect::Inspection,
    walker::{DirectoryNode, RegionSource},
};

/// Plain-text report of an [`Inspection`]: boot sector, FAT chains, then
/// every directory depth-first starting at the root.
pub struct ReportDisplay<'a> {
    insp: &'a Inspection,
}

impl<'a> ReportDisplay<'a> {
    pub fn new(insp: &'a Inspection) -> Self {
        Self { insp }
    }

    fn boot_sector(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.insp.volume;
        writeln!(f, "Boot sector information:")?;
        writeln!(f, " OEM name: {}", v.oem_name)?;
        writeln!(f, " Bytes per sector: {}", v.bytes_per_sector)?;
        writeln!(f, " Sectors per cluster: {}", v.sectors_per_cluster)?;
        writeln!(f, " Reserved sectors: {}", v.reserved_sectors)?;
        writeln!(f, " Number of FATs: {}", v.number_of_fats)?;
        writeln!(
            f,
            " Maximum number of root directory entries: {}",
            v.max_root_entries
        )?;
        writeln!(f, " Total sectors: {}", v.total_sectors)?;
        writeln!(f, " Media descriptor: {}", v.media_descriptor)?;
        writeln!(f, " Sectors per FAT: {}", v.sectors_per_fat)?;
        writeln!(f, " Sectors per track: {}", v.sectors_per_track)?;
        writeln!(f, " Number of heads: {}", v.number_of_heads)?;
        writeln!(f, " Hidden sectors: {}", v.hidden_sectors)?;
        writeln!(f, " Logical drive number: {}", v.logical_drive_number)?;
        writeln!(f, " Extended signature: {}", v.extended_signature)?;
        writeln!(f, " Volume serial number: {}", v.volume_serial_number)?;
        writeln!(f, " Volume label: {}", v.volume_label)?;
        writeln!(f, " File system type: {}", v.file_system_type)?;
        writeln!(
            f,
            " Boot signature: {:02x}{:02x}",
            v.signature[0], v.signature[1]
        )?;
        writeln!(f)
    }

    fn fat(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.insp.fat;
        let bps = self.insp.volume.bytes_per_sector as usize;
        writeln!(f, "FAT information:")?;
        writeln!(
            f,
            " FAT size: {} bytes / {} entries / {} sectors",
            s.size_bytes,
            s.entry_count,
            s.size_bytes / bps
        )?;
        writeln!(f, " FAT ID: {:04x}", s.fat_id)?;
        writeln!(f, " End-of-chain marker: {:04x}", s.end_of_chain_marker)?;
        writeln!(f, " Chains: (as cluster numbers)")?;
        for chain in &s.chains {
            writeln!(f, "    {}: {}", chain.start, chain)?;
        }
        write_anomalies(f, "    ", &self.insp.anomalies)?;
        writeln!(f)
    }

    fn directory(&self, f: &mut fmt::Formatter<'_>, node: &DirectoryNode) -> fmt::Result {
        let indent = match node.source {
            RegionSource::Root => {
                writeln!(f, "Root directory information:")?;
                writeln!(
                    f,
                    " Root directory start sector: {}",
                    sector(node.start_sector)
                )?;
                writeln!(
                    f,
                    " Root directory max size: {} bytes / {} entries",
                    node.size_bytes, self.insp.volume.max_root_entries
                )?;
                writeln!(f, " Entries:")?;
                "    "
            }
            RegionSource::Cluster(c) => {
                writeln!(f, "Directory at cluster {c}:")?;
                writeln!(f, "    Start sector: {}", sector(node.start_sector))?;
                writeln!(f, "    Size: {} bytes", node.size_bytes)?;
                writeln!(f, "    Entries:")?;
                "        "
            }
        };

        for e in &node.entries {
            write_entry(f, indent, e)?;
        }
        write_anomalies(f, indent, &node.anomalies)
    }
}

fn sector(s: Option<u64>) -> SectorDisplay {
    SectorDisplay(s)
}

struct SectorDisplay(Option<u64>);

impl fmt::Display for SectorDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "-"),
        }
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, indent: &str, e: &DirectoryEntry) -> fmt::Result {
    if e.kind == EntryKind::Deleted {
        return writeln!(f, "{indent}{:04}: [deleted entry]", e.index);
    }
    writeln!(
        f,
        "{indent}{:04}: {} {}, attributes: {:02x}, cluster: {} (sector: {}), size: {} bytes",
        e.index,
        e.name_raw,
        e.ext_raw,
        e.attributes.bits(),
        e.first_cluster,
        sector(e.start_sector),
        e.size_bytes
    )
}

fn write_anomalies(f: &mut fmt::Formatter<'_>, indent: &str, list: &[Anomaly]) -> fmt::Result {
    for a in list {
        writeln!(f, "{indent}[{}] {} {}", a.severity().tag(), a.code(), a)?;
    }
    Ok(())
}

impl fmt::Display for ReportDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.boot_sector(f)?;
        self.fat(f)?;

        for (i, node) in self.insp.tree.iter_depth_first().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            self.directory(f, node)?;
        }
        Ok(())
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.report(), f)
    }
}

#[cfg(test)]
mod tests {
    use crate::fs::fat16::{
        constant::FAT_SIGNATURE,
        inspect::inspect,
        types::{Fat16BootSector, Fat16DirEntry},
    };
    use alloc::string::ToString;
    use zerocopy::IntoBytes;
    use zerocopy::byteorder::little_endian::U16;

    fn sample() -> alloc::vec::Vec<u8> {
        let mut bs = Fat16BootSector::default();
        bs.oem_name = *b"FATSCOPE";
        bs.bytes_per_sector = U16::new(512);
        bs.sectors_per_cluster = 1;
        bs.reserved_sectors = U16::new(1);
        bs.num_fats = 1;
        bs.root_entry_count = U16::new(16);
        bs.fat_size_16 = U16::new(1);
        bs.volume_label = *b"TESTVOL    ";
        bs.fs_type = *b"FAT16   ";
        bs.signature = FAT_SIGNATURE;

        let mut img = vec![0u8; 1536 + 8 * 512];
        img[..512].copy_from_slice(bs.as_bytes());
        for (i, v) in [0xFFF8u16, 0xFFFF, 0, 0xFFFF, 5, 0xFFFF].iter().enumerate() {
            img[512 + i * 2..514 + i * 2].copy_from_slice(&v.to_le_bytes());
        }

        let mut deleted = Fat16DirEntry::new(*b"GONE    ", *b"TXT", 0x20, 0, 0);
        deleted.name[0] = 0xE5;
        let root = [
            Fat16DirEntry::new(*b"SUB     ", *b"   ", 0x10, 3, 0),
            deleted,
            Fat16DirEntry::new(*b"FILE    ", *b"BIN", 0x20, 4, 700),
        ];
        for (i, e) in root.iter().enumerate() {
            img[1024 + i * 32..1056 + i * 32].copy_from_slice(e.as_bytes());
        }
        let sub = Fat16DirEntry::new(*b"INNER   ", *b"TXT", 0x20, 0, 0);
        img[1536 + 512..1536 + 544].copy_from_slice(sub.as_bytes());
        img
    }

    #[test]
    fn test_report_sections() {
        let insp = inspect(&sample()).expect("valid image");
        let text = insp.to_string();

        assert!(text.starts_with("Boot sector information:\n OEM name: FATSCOPE\n"));
        assert!(text.contains(" Volume label: TESTVOL    \n"));
        assert!(text.contains(" Boot signature: 55aa\n"));
        assert!(text.contains(" FAT size: 512 bytes / 256 entries / 1 sectors\n"));
        assert!(text.contains(" FAT ID: fff8\n"));
        assert!(text.contains(" End-of-chain marker: ffff\n"));
        assert!(text.contains("    3: 3 -> EOF\n"));
        assert!(text.contains("    4: 4 -> 5 -> EOF\n"));
        assert!(text.contains(" Root directory start sector: 2\n"));
        assert!(text.contains(" Root directory max size: 512 bytes / 16 entries\n"));
        assert!(text.contains(
            "    0000: SUB         , attributes: 10, cluster: 3 (sector: 4), size: 0 bytes\n"
        ));
        assert!(text.contains("    0001: [deleted entry]\n"));
        assert!(text.contains(
            "    0002: FILE     BIN, attributes: 20, cluster: 4 (sector: 5), size: 700 bytes\n"
        ));
        assert!(text.contains("\nDirectory at cluster 3:\n    Start sector: 4\n    Size: 512 bytes\n"));
        assert!(text.contains(
            "        0000: INNER    TXT, attributes: 20, cluster: 0 (sector: 2), size: 0 bytes\n"
        ));
    }

    #[test]
    fn test_anomalies_are_listed() {
        let mut img = sample();
        // SUB now loops onto itself through the FAT
        img[512 + 6..512 + 8].copy_from_slice(&3u16.to_le_bytes());
        let text = inspect(&img).expect("valid image").to_string();

        assert!(text.contains("    3: 3 -> Cycle detected (closes at 3)\n"));
        assert!(text.contains("    [ERR ] FAT.CYCLE Cluster chain loops back to 3\n"));
    }
}
