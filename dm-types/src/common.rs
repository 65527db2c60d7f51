//! Common sector addressing types shared across models

use serde::{Deserialize, Serialize};

/// Size of one device-mapper sector in bytes
pub const SECTOR_SIZE: u64 = 512;

/// Width of the kernel's fixed target type name field, including the terminating NUL
pub const DM_MAX_TYPE_NAME: usize = 16;

/// A contiguous run of 512-byte sectors within a mapped device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorRange {
    /// First sector (inclusive)
    pub start: u64,

    /// Number of sectors
    pub length: u64,
}

impl SectorRange {
    pub fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// First sector past the end of this range
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.length)
    }

    /// A zero-length range is representable but never valid inside a loaded table
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check whether two ranges share at least one sector
    pub fn overlaps(&self, other: &SectorRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end()
            && other.start < self.end()
    }

    /// Size of this range in bytes
    pub fn bytes(&self) -> u64 {
        sectors_to_bytes(self.length)
    }
}

/// Convert a sector count into bytes
pub fn sectors_to_bytes(sectors: u64) -> u64 {
    sectors.saturating_mul(SECTOR_SIZE)
}
