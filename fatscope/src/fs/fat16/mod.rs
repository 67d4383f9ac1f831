pub mod anomaly;
pub mod attr;
pub mod constant;
pub mod dir;
pub mod fat;
pub mod inspect;
pub mod report;
pub mod types;
pub mod volume;
pub mod walker;

// === Public Interface ===
pub mod prelude {
    pub use super::anomaly::{Anomaly, Region, Severity};
    pub use super::attr::Fat16Attributes;
    pub use super::dir::{DirectoryEntry, DirectoryListing, EntryKind, read_directory};
    pub use super::fat::{ChainEnd, ChainIter, ClusterChain, FatEntry, FatSummary, FatTable};
    pub use super::inspect::{Inspection, inspect, inspect_with};
    pub use super::report::ReportDisplay;
    pub use super::types::{Fat16BootSector, Fat16DirEntry};
    pub use super::volume::{FixedText, Volume};
    pub use super::walker::{
        DirectoryNode, DirectoryTree, DirectoryTreeWalker, NodeId, RegionSource, WalkOptions,
    };
    pub use crate::core::errors::*;
}
