// === Sub-modules ===
pub mod errors;
pub mod utils;
pub mod visited;

// === Error types ===
pub use errors::*;

pub use visited::VisitedClusters;
