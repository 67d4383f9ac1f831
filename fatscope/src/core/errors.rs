// SPDX-License-Identifier: MIT

use core::fmt;

/// Boot sector problems. Nothing past the boot sector can be trusted when one
/// of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Image shorter than one boot sector.
    Truncated { len: usize },
    InvalidGeometry(&'static str),
}

impl FormatError {
    pub fn msg(&self) -> &'static str {
        match self {
            FormatError::Truncated { .. } => "Image shorter than a boot sector",
            FormatError::InvalidGeometry(msg) => msg,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        if let FormatError::Truncated { len } = self {
            write!(f, " ({len} bytes, need 512)")?;
        }
        Ok(())
    }
}

/// FAT lookup outside `[0, entry_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterRangeError {
    pub index: u32,
    pub entry_count: usize,
}

impl ClusterRangeError {
    pub fn msg(&self) -> &'static str {
        "Cluster index outside the FAT"
    }
}

impl fmt::Display for ClusterRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (index: {}, entries: {})",
            self.msg(),
            self.index,
            self.entry_count
        )
    }
}

/// Directory region cut in the middle of a 32-byte record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodingError {
    /// Byte offset of the partial record inside the region.
    pub offset: usize,
    pub remaining: usize,
}

impl DecodingError {
    pub fn msg(&self) -> &'static str {
        "Directory region truncated mid-entry"
    }
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (offset: {}, {} of 32 bytes)",
            self.msg(),
            self.offset,
            self.remaining
        )
    }
}

/// Top-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    Format(FormatError),
    ClusterRange(ClusterRangeError),
    Decoding(DecodingError),
}

impl FsError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsError::Format(_) => "Invalid boot sector",
            FsError::ClusterRange(_) => "FAT lookup failed",
            FsError::Decoding(_) => "Directory decoding failed",
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        match self {
            FsError::Format(e) => write!(f, "\n  caused by: {e}")?,
            FsError::ClusterRange(e) => write!(f, "\n  caused by: {e}")?,
            FsError::Decoding(e) => write!(f, "\n  caused by: {e}")?,
        }
        Ok(())
    }
}

impl core::error::Error for FormatError {}
impl core::error::Error for ClusterRangeError {}
impl core::error::Error for DecodingError {}
impl core::error::Error for FsError {}

// === impl From ===

impl From<FormatError> for FsError {
    fn from(e: FormatError) -> Self {
        FsError::Format(e)
    }
}

impl From<ClusterRangeError> for FsError {
    fn from(e: ClusterRangeError) -> Self {
        FsError::ClusterRange(e)
    }
}

impl From<DecodingError> for FsError {
    fn from(e: DecodingError) -> Self {
        FsError::Decoding(e)
    }
}

// === type Fs*Result ===

pub type FsResult<T = ()> = Result<T, FsError>;

pub type FormatResult<T = ()> = Result<T, FormatError>;
pub type ClusterRangeResult<T = ()> = Result<T, ClusterRangeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_chain_display() {
        let top = FsError::from(FormatError::Truncated { len: 100 });
        let text = top.to_string();
        assert!(text.starts_with("Invalid boot sector"));
        assert!(text.contains("caused by: Image shorter than a boot sector (100 bytes, need 512)"));
    }

    #[test]
    fn test_geometry_reason_is_kept() {
        let e = FormatError::InvalidGeometry("Bytes per sector is zero");
        assert_eq!(e.to_string(), "Bytes per sector is zero");
        assert_eq!(
            FsError::from(e).to_string(),
            "Invalid boot sector\n  caused by: Bytes per sector is zero"
        );
    }

    #[test]
    fn test_cluster_range_display() {
        let e = ClusterRangeError {
            index: 300,
            entry_count: 256,
        };
        assert_eq!(
            e.to_string(),
            "Cluster index outside the FAT (index: 300, entries: 256)"
        );
    }
}
