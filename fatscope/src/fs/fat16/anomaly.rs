// SPDX-License-Identifier: MIT

use core::fmt;

use crate::core::errors::DecodingError;
use crate::fs::fat16::fat::FatEntry;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warn,
    Error,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Warn => "WARN",
            Severity::Error => "ERR ",
        }
    }
}

/// Image area an anomaly refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Region {
    Fat,
    RootDirectory,
    Cluster(u16),
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Fat => write!(f, "FAT"),
            Region::RootDirectory => write!(f, "root directory"),
            Region::Cluster(c) => write!(f, "cluster {c}"),
        }
    }
}

/// Non-fatal structural finding, attached to whatever it was found in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// A link names a cluster outside `[2, entry_count)`. `from` is the FAT
    /// index holding the link, `None` when it came from a directory entry.
    DanglingReference { from: Option<u16>, target: u16 },
    /// A chain revisits `closes_at`.
    CycleDetected { closes_at: u16 },
    /// A link lands on a free or reserved FAT entry.
    BrokenChain { at: u16, entry: FatEntry },
    /// A chain runs into `cluster`, which another chain already holds.
    CrossLinked { cluster: u16 },
    /// Subdirectory entry `entry` points at a directory already walked.
    RepeatedDirectory { entry: usize, cluster: u16 },
    /// Subdirectory entry `entry` sits below the configured depth limit.
    DepthLimit { entry: usize, depth: usize },
    /// Region extends past the end of the image.
    TruncatedRegion { region: Region, expected: u64, available: u64 },
    /// `sectors_per_cluster` is 0, so every data cluster is empty.
    ZeroClusterSize,
    Decoding(DecodingError),
}

impl Anomaly {
    pub fn code(&self) -> &'static str {
        match self {
            Anomaly::DanglingReference { .. } => "FAT.DANGLING",
            Anomaly::CycleDetected { .. } => "FAT.CYCLE",
            Anomaly::BrokenChain { .. } => "FAT.BROKEN",
            Anomaly::CrossLinked { .. } => "FAT.CROSSLINK",
            Anomaly::RepeatedDirectory { .. } => "WALK.REPEAT",
            Anomaly::DepthLimit { .. } => "WALK.DEPTH",
            Anomaly::TruncatedRegion { .. } => "IMG.TRUNCATED",
            Anomaly::ZeroClusterSize => "IMG.GEOMETRY",
            Anomaly::Decoding(_) => "DIR.DECODE",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Anomaly::DanglingReference { .. }
            | Anomaly::CycleDetected { .. }
            | Anomaly::TruncatedRegion { .. } => Severity::Error,
            Anomaly::BrokenChain { .. }
            | Anomaly::CrossLinked { .. }
            | Anomaly::ZeroClusterSize
            | Anomaly::RepeatedDirectory { .. }
            | Anomaly::DepthLimit { .. }
            | Anomaly::Decoding(_) => Severity::Warn,
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::DanglingReference {
                from: Some(from),
                target,
            } => write!(f, "FAT entry {from} points outside the table ({target})"),
            Anomaly::DanglingReference { from: None, target } => {
                write!(f, "Directory entry points outside the table ({target})")
            }
            Anomaly::CycleDetected { closes_at } => {
                write!(f, "Cluster chain loops back to {closes_at}")
            }
            Anomaly::BrokenChain { at, entry } => {
                write!(f, "Cluster chain continues into {entry} entry {at}")
            }
            Anomaly::CrossLinked { cluster } => {
                write!(f, "Cluster chain runs into {cluster}, already in another chain")
            }
            Anomaly::RepeatedDirectory { entry, cluster } => write!(
                f,
                "Entry {entry:04}: loop or duplicate ref to dir cluster {cluster}"
            ),
            Anomaly::DepthLimit { entry, depth } => write!(
                f,
                "Entry {entry:04}: directory depth limit reached ({depth})"
            ),
            Anomaly::TruncatedRegion {
                region,
                expected,
                available,
            } => write!(
                f,
                "{region} cut short by end of image ({available} of {expected} bytes)"
            ),
            Anomaly::ZeroClusterSize => {
                write!(f, "Sectors per cluster is 0, data clusters hold no bytes")
            }
            Anomaly::Decoding(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warn);
        assert_eq!(Severity::Warn.tag(), "WARN");
        assert_eq!(Severity::Error.tag(), "ERR ");
    }

    #[test]
    fn test_codes_and_messages() {
        let a = Anomaly::CycleDetected { closes_at: 5 };
        assert_eq!(a.code(), "FAT.CYCLE");
        assert_eq!(a.severity(), Severity::Error);
        assert_eq!(a.to_string(), "Cluster chain loops back to 5");

        let r = Anomaly::RepeatedDirectory {
            entry: 3,
            cluster: 20,
        };
        assert_eq!(r.code(), "WALK.REPEAT");
        assert_eq!(r.to_string(), "Entry 0003: loop or duplicate ref to dir cluster 20");

        let t = Anomaly::TruncatedRegion {
            region: Region::Cluster(9),
            expected: 512,
            available: 100,
        };
        assert_eq!(t.to_string(), "cluster 9 cut short by end of image (100 of 512 bytes)");

        let x = Anomaly::CrossLinked { cluster: 7 };
        assert_eq!(x.code(), "FAT.CROSSLINK");
        assert_eq!(x.severity(), Severity::Warn);
        assert_eq!(Anomaly::ZeroClusterSize.code(), "IMG.GEOMETRY");
    }
}
