// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::core::{utils::region::clamped, visited::VisitedClusters};
use crate::fs::fat16::{
    anomaly::{Anomaly, Region},
    constant::*,
    dir::{DirectoryEntry, read_directory},
    fat::{ClusterChain, FatTable},
    volume::Volume,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkOptions {
    /// Subdirectories nested deeper than this are listed but not expanded.
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: FAT_DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// Where a directory's bytes come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionSource {
    Root,
    Cluster(u16),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Slot of the parent entry this node was expanded from.
    pub entry_index: Option<usize>,
    pub depth: usize,
    pub source: RegionSource,
    pub start_sector: Option<u64>,
    pub size_bytes: u64,
    /// `None` for the root region, which lives outside the data area.
    pub chain: Option<ClusterChain>,
    pub entries: Vec<DirectoryEntry>,
    pub children: Vec<NodeId>,
    pub anomalies: Vec<Anomaly>,
}

impl DirectoryNode {
    fn new(source: RegionSource, start_sector: Option<u64>, size_bytes: u64) -> Self {
        Self {
            id: NodeId(0),
            parent: None,
            entry_index: None,
            depth: 0,
            source,
            start_sector,
            size_bytes,
            chain: None,
            entries: Vec::new(),
            children: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.source == RegionSource::Root
    }

    fn load(&mut self, region: &[u8], volume: &Volume) {
        let listing = read_directory(region, volume);
        self.entries = listing.entries;
        if let Some(e) = listing.error {
            self.anomalies.push(Anomaly::Decoding(e));
        }
    }
}

/// Every directory reached from the root, stored flat. Node 0 is the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryTree {
    nodes: Vec<DirectoryNode>,
}

impl DirectoryTree {
    pub fn root(&self) -> &DirectoryNode {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[DirectoryNode] {
        &self.nodes
    }

    /// Pre-order, children in entry order.
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: vec![NodeId(0)],
        }
    }

    pub fn anomalies(&self) -> impl Iterator<Item = (NodeId, &Anomaly)> {
        self.nodes
            .iter()
            .flat_map(|n| n.anomalies.iter().map(move |a| (n.id, a)))
    }

    fn push(&mut self, mut node: DirectoryNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        self.nodes.push(node);
        id
    }
}

pub struct DepthFirst<'a> {
    tree: &'a DirectoryTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a DirectoryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.stack.pop()?)?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Subdirectory entry waiting to be expanded.
struct Pending {
    parent: NodeId,
    entry: usize,
    cluster: u16,
    depth: usize,
}

/// Builds the directory tree with an explicit worklist.
///
/// Every cluster of an expanded directory is claimed in one visited set per
/// walk, so a cluster is read into one directory at most. A directory chain
/// running into a claimed cluster stops there (`FAT.CROSSLINK`). References
/// back to the root (cluster 0), or to any claimed cluster, are reported as
/// `WALK.REPEAT` on the directory that holds the entry.
pub struct DirectoryTreeWalker<'a> {
    volume: &'a Volume,
    fat: FatTable<'a>,
    image: &'a [u8],
    opts: WalkOptions,
}

impl<'a> DirectoryTreeWalker<'a> {
    pub fn new(volume: &'a Volume, fat: FatTable<'a>, image: &'a [u8]) -> Self {
        Self {
            volume,
            fat,
            image,
            opts: WalkOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: WalkOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn walk(&self) -> DirectoryTree {
        let mut tree = DirectoryTree { nodes: Vec::new() };
        let mut visited = VisitedClusters::new(self.fat.entry_count());
        let mut stack: Vec<Pending> = Vec::new();

        let root = tree.push(self.read_root());
        self.schedule(&mut tree.nodes[root.0], &mut stack);

        while let Some(p) = stack.pop() {
            if visited.contains(p.cluster) {
                tree.nodes[p.parent.0]
                    .anomalies
                    .push(Anomaly::RepeatedDirectory {
                        entry: p.entry,
                        cluster: p.cluster,
                    });
                continue;
            }

            let mut node = self.read_cluster_dir(p.cluster, &mut visited);
            node.parent = Some(p.parent);
            node.entry_index = Some(p.entry);
            node.depth = p.depth;

            let id = tree.push(node);
            tree.nodes[p.parent.0].children.push(id);
            self.schedule(&mut tree.nodes[id.0], &mut stack);
        }

        tree
    }

    fn read_root(&self) -> DirectoryNode {
        let vol = self.volume;
        let expected = vol.root_directory_size_bytes;
        let region = clamped(self.image, vol.root_directory_start, expected);

        let mut node = DirectoryNode::new(
            RegionSource::Root,
            Some(vol.root_directory_start_sector()),
            expected,
        );
        if (region.len() as u64) < expected {
            node.anomalies.push(Anomaly::TruncatedRegion {
                region: Region::RootDirectory,
                expected,
                available: region.len() as u64,
            });
        }
        node.load(region, vol);
        node
    }

    fn read_cluster_dir(&self, start: u16, claimed: &mut VisitedClusters) -> DirectoryNode {
        let vol = self.volume;
        let chain = self.fat.claim_chain(start, claimed);
        let cluster_size = vol.cluster_size_bytes();
        let expected = chain.len() as u64 * cluster_size;

        let mut region = Vec::new();
        for &c in &chain.clusters {
            let Some(offset) = vol.cluster_offset(c) else {
                break;
            };
            let bytes = clamped(self.image, offset, cluster_size);
            region.extend_from_slice(bytes);
            // a partial cluster is the last one that lines up
            if (bytes.len() as u64) < cluster_size {
                break;
            }
        }

        let mut node = DirectoryNode::new(
            RegionSource::Cluster(start),
            vol.cluster_start_sector(start),
            expected,
        );
        if let Some(a) = chain.end.anomaly() {
            node.anomalies.push(a);
        }
        if (region.len() as u64) < expected {
            node.anomalies.push(Anomaly::TruncatedRegion {
                region: Region::Cluster(start),
                expected,
                available: region.len() as u64,
            });
        }
        node.chain = Some(chain);
        node.load(&region, vol);
        node
    }

    /// Queues the node's subdirectory entries, first entry on top.
    fn schedule(&self, node: &mut DirectoryNode, stack: &mut Vec<Pending>) {
        let depth = node.depth + 1;
        let mut queued = Vec::new();

        for e in node.entries.iter().filter(|e| e.is_subdirectory()) {
            let cluster = e.first_cluster;
            if cluster == 0 {
                node.anomalies.push(Anomaly::RepeatedDirectory {
                    entry: e.index,
                    cluster,
                });
                continue;
            }
            if !self.fat.is_data_cluster(cluster) {
                node.anomalies.push(Anomaly::DanglingReference {
                    from: None,
                    target: cluster,
                });
                continue;
            }
            if depth > self.opts.max_depth {
                node.anomalies.push(Anomaly::DepthLimit {
                    entry: e.index,
                    depth: self.opts.max_depth,
                });
                continue;
            }
            queued.push(Pending {
                parent: node.id,
                entry: e.index,
                cluster,
                depth,
            });
        }

        stack.extend(queued.into_iter().rev());
    }
}
