// SPDX-License-Identifier: MIT

bitflags::bitflags! {
    /// Directory entry attribute byte. Unknown bits are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Fat16Attributes: u8 {
        const READ_ONLY = 0x01;
        const HIDDEN    = 0x02;
        const SYSTEM    = 0x04;
        const VOLUME_ID = 0x08;
        const DIRECTORY = 0x10;
        const ARCHIVE   = 0x20;
    }
}

impl Fat16Attributes {
    #[inline]
    pub fn from_raw(attr: u8) -> Self {
        Self::from_bits_retain(attr)
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.contains(Self::DIRECTORY)
    }

    #[inline]
    pub fn is_volume_id(&self) -> bool {
        self.contains(Self::VOLUME_ID)
    }
}
