// SPDX-License-Identifier: MIT

mod boot;
mod entries;

pub use boot::Fat16BootSector;
pub use entries::Fat16DirEntry;
