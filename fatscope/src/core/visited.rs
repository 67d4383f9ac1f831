// SPDX-License-Identifier: MIT

//! Bounded visited set for cluster traversals.
//!
//! Every traversal over on-disk links (FAT chains, subdirectory references)
//! owns one of these. Its capacity is the FAT entry count, so a traversal that
//! only advances onto unvisited clusters cannot take more steps than there are
//! entries, whatever the image contains.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// One bit per cluster index in `[0, capacity)`.
///
/// # Example
/// ```
/// use fatscope::core::VisitedClusters;
///
/// let mut seen = VisitedClusters::new(16);
/// assert!(seen.insert(5));
/// assert!(!seen.insert(5));
/// assert!(!seen.insert(16)); // out of range, never recorded
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedClusters {
    bitmap: Vec<u8>,
    capacity: usize,
}

impl VisitedClusters {
    pub fn new(capacity: usize) -> Self {
        Self {
            bitmap: vec![0u8; capacity.div_ceil(8)],
            capacity,
        }
    }

    #[inline]
    pub fn in_range(&self, cluster: u16) -> bool {
        (cluster as usize) < self.capacity
    }

    /// Records `cluster`. Returns `true` if it was in range and not seen yet.
    #[inline]
    pub fn insert(&mut self, cluster: u16) -> bool {
        if !self.in_range(cluster) || self.contains(cluster) {
            return false;
        }
        let (byte, mask) = locate(cluster);
        self.bitmap[byte] |= mask;
        true
    }

    #[inline]
    pub fn contains(&self, cluster: u16) -> bool {
        let (byte, mask) = locate(cluster);
        self.in_range(cluster) && self.bitmap[byte] & mask != 0
    }

    pub fn len(&self) -> usize {
        self.bitmap.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Byte index and bit mask, LSB first.
#[inline]
fn locate(cluster: u16) -> (usize, u8) {
    (cluster as usize / 8, 1 << (cluster % 8))
}
