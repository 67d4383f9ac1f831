// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::core::{errors::*, visited::VisitedClusters};
use crate::fs::fat16::{anomaly::Anomaly, constant::*};

/// State of one 16-bit FAT slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FatEntry {
    Free,
    /// Slots 0 and 1 (media id and end-of-chain marker), raw value kept.
    Reserved(u16),
    Pointer(u16),
    EndOfChain(u16),
}

impl FatEntry {
    /// Classifies a raw value found at a data cluster index.
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        match value {
            FAT_FREE => FatEntry::Free,
            v if v >= FAT_EOC_MIN => FatEntry::EndOfChain(v),
            v => FatEntry::Pointer(v),
        }
    }
}

impl fmt::Display for FatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatEntry::Free => write!(f, "free"),
            FatEntry::Reserved(_) => write!(f, "reserved"),
            FatEntry::Pointer(n) => write!(f, "pointer({n})"),
            FatEntry::EndOfChain(_) => write!(f, "end-of-chain"),
        }
    }
}

/// Read-only view over one FAT copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatTable<'a> {
    bytes: &'a [u8],
}

impl<'a> FatTable<'a> {
    /// `bytes` is the FAT region; a trailing odd byte is ignored.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Slots addressable with a 16-bit cluster number; a larger FAT region
    /// only contributes its first 65536 entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        (self.bytes.len() / FAT_ENTRY_SIZE).min(FAT_MAX_ENTRIES)
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Raw little-endian value of slot `index`.
    pub fn raw_at(&self, index: u32) -> ClusterRangeResult<u16> {
        let i = index as usize;
        if i >= self.entry_count() {
            return Err(ClusterRangeError {
                index,
                entry_count: self.entry_count(),
            });
        }
        let off = i * FAT_ENTRY_SIZE;
        Ok(u16::from_le_bytes([self.bytes[off], self.bytes[off + 1]]))
    }

    pub fn entry_at(&self, index: u32) -> ClusterRangeResult<FatEntry> {
        let raw = self.raw_at(index)?;
        if (index as usize) < FAT_FIRST_CLUSTER as usize {
            return Ok(FatEntry::Reserved(raw));
        }
        Ok(FatEntry::from_raw(raw))
    }

    /// Whether `cluster` can be a chain member: `[2, entry_count)`.
    #[inline]
    pub fn is_data_cluster(&self, cluster: u16) -> bool {
        cluster >= FAT_FIRST_CLUSTER && (cluster as usize) < self.entry_count()
    }

    /// Media id slot (FAT[0]), 0 when the table is empty.
    pub fn fat_id(&self) -> u16 {
        self.raw_at(0).unwrap_or(0)
    }

    /// FAT[1], 0 when the table has a single slot.
    pub fn end_of_chain_marker(&self) -> u16 {
        self.raw_at(1).unwrap_or(0)
    }

    /// Lazily walks the chain starting at `start`.
    pub fn follow_chain(&self, start: u16) -> ChainIter<'a> {
        ChainIter::new(*self, start)
    }

    pub fn resolve_chain(&self, start: u16) -> ClusterChain {
        let mut it = self.follow_chain(start);
        let clusters: Vec<u16> = it.by_ref().collect();
        ClusterChain {
            start,
            clusters,
            end: it.end().unwrap_or(ChainEnd::EndOfChain),
        }
    }

    /// Resolves the chain at `start`, claiming its clusters in `claimed`.
    ///
    /// The chain stops with `Joins` on a cluster claimed by an earlier call,
    /// so a shared set bounds the total work of many calls by the entry
    /// count. `claimed` must hold `entry_count` clusters.
    pub fn claim_chain(&self, start: u16, claimed: &mut VisitedClusters) -> ClusterChain {
        let mut clusters = Vec::new();

        let end = if !self.is_data_cluster(start) {
            ChainEnd::DanglingReference {
                from: None,
                target: start,
            }
        } else if !claimed.insert(start) {
            ChainEnd::Joins { cluster: start }
        } else {
            let mut current = start;
            loop {
                clusters.push(current);
                match self.link(current) {
                    Err(end) => break end,
                    Ok(next) if claimed.insert(next) => current = next,
                    // one scan per chain
                    Ok(next) if clusters.contains(&next) => {
                        break ChainEnd::CycleDetected { closes_at: next };
                    }
                    Ok(next) => break ChainEnd::Joins { cluster: next },
                }
            }
        };

        ClusterChain {
            start,
            clusters,
            end,
        }
    }

    /// One chain per group of linked clusters, in index order.
    ///
    /// Every used cluster is listed once: a chain running into a cluster
    /// listed earlier ends there with `Joins`.
    pub fn summary(&self) -> FatSummary {
        let mut covered = VisitedClusters::new(self.entry_count());
        let mut chains = Vec::new();

        for index in FAT_FIRST_CLUSTER as usize..self.entry_count() {
            let start = index as u16;
            if covered.contains(start) {
                continue;
            }
            if matches!(self.entry_at(index as u32), Ok(FatEntry::Free)) {
                continue;
            }
            chains.push(self.claim_chain(start, &mut covered));
        }

        FatSummary {
            entry_count: self.entry_count(),
            size_bytes: self.size_bytes(),
            fat_id: self.fat_id(),
            end_of_chain_marker: self.end_of_chain_marker(),
            chains,
        }
    }

    /// Next member after `current`, or why the chain ends there.
    fn link(&self, current: u16) -> Result<u16, ChainEnd> {
        match self.entry_at(current as u32) {
            Ok(FatEntry::EndOfChain(_)) => Err(ChainEnd::EndOfChain),
            Ok(FatEntry::Pointer(next)) if !self.is_data_cluster(next) => {
                Err(ChainEnd::DanglingReference {
                    from: Some(current),
                    target: next,
                })
            }
            Ok(FatEntry::Pointer(next)) => Ok(next),
            Ok(entry @ (FatEntry::Free | FatEntry::Reserved(_))) => {
                Err(ChainEnd::Broken { at: current, entry })
            }
            // unreachable for members, which are range-checked first
            Err(_) => Err(ChainEnd::DanglingReference {
                from: None,
                target: current,
            }),
        }
    }
}

/// Why a chain stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChainEnd {
    EndOfChain,
    CycleDetected { closes_at: u16 },
    /// `from` is `None` when the start itself was out of range.
    DanglingReference { from: Option<u16>, target: u16 },
    Broken { at: u16, entry: FatEntry },
    /// Runs into `cluster`, already claimed by another chain.
    Joins { cluster: u16 },
}

impl ChainEnd {
    pub fn is_clean(&self) -> bool {
        matches!(self, ChainEnd::EndOfChain)
    }

    pub fn anomaly(&self) -> Option<Anomaly> {
        match *self {
            ChainEnd::EndOfChain => None,
            ChainEnd::CycleDetected { closes_at } => Some(Anomaly::CycleDetected { closes_at }),
            ChainEnd::DanglingReference { from, target } => {
                Some(Anomaly::DanglingReference { from, target })
            }
            ChainEnd::Broken { at, entry } => Some(Anomaly::BrokenChain { at, entry }),
            ChainEnd::Joins { cluster } => Some(Anomaly::CrossLinked { cluster }),
        }
    }
}

/// Cluster chain iterator with a per-call visited set.
///
/// Each yielded cluster is recorded before the next link is followed and a
/// link onto a recorded cluster stops the walk, so at most `entry_count`
/// items are produced whatever the table holds.
#[derive(Debug, Clone)]
pub struct ChainIter<'a> {
    fat: FatTable<'a>,
    next: Option<u16>,
    visited: VisitedClusters,
    end: Option<ChainEnd>,
}

impl<'a> ChainIter<'a> {
    fn new(fat: FatTable<'a>, start: u16) -> Self {
        let mut visited = VisitedClusters::new(fat.entry_count());
        let (next, end) = if fat.is_data_cluster(start) {
            visited.insert(start);
            (Some(start), None)
        } else {
            let dangling = ChainEnd::DanglingReference {
                from: None,
                target: start,
            };
            (None, Some(dangling))
        };
        Self {
            fat,
            next,
            visited,
            end,
        }
    }

    /// Termination reason, available once the iterator returned `None`.
    pub fn end(&self) -> Option<ChainEnd> {
        if self.next.is_some() { None } else { self.end }
    }

    fn advance(&mut self, current: u16) -> Option<u16> {
        match self.fat.link(current) {
            Ok(next) if self.visited.insert(next) => Some(next),
            Ok(next) => {
                self.end = Some(ChainEnd::CycleDetected { closes_at: next });
                None
            }
            Err(end) => {
                self.end = Some(end);
                None
            }
        }
    }
}

impl Iterator for ChainIter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let current = self.next.take()?;
        self.next = self.advance(current);
        Some(current)
    }
}

/// Resolved chain, in link order, with its termination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterChain {
    pub start: u16,
    pub clusters: Vec<u16>,
    pub end: ChainEnd,
}

impl ClusterChain {
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl fmt::Display for ClusterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.clusters {
            write!(f, "{c} -> ")?;
        }
        match self.end {
            ChainEnd::EndOfChain => write!(f, "EOF"),
            ChainEnd::CycleDetected { closes_at } => {
                write!(f, "Cycle detected (closes at {closes_at})")
            }
            ChainEnd::DanglingReference { target, .. } => {
                write!(f, "Dangling reference ({target})")
            }
            ChainEnd::Broken { at, entry } => write!(f, "Broken ({entry} entry at {at})"),
            ChainEnd::Joins { cluster } => write!(f, "(joins {cluster})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FatSummary {
    pub entry_count: usize,
    pub size_bytes: usize,
    pub fat_id: u16,
    pub end_of_chain_marker: u16,
    pub chains: Vec<ClusterChain>,
}
