#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

// Core Modules
pub mod core;
pub mod fs;

// Error types
pub use crate::core::errors::*;

/// FAT16 image inspection.
///
/// See [`fat16::inspect`], [`fat16::FatTable`] and [`fat16::DirectoryTreeWalker`].
pub mod fat16 {
    pub use super::fs::fat16::prelude::*;
}
