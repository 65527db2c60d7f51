// SPDX-License-Identifier: GPL-3.0-only

//! Kernel dm-ioctl record layouts
//!
//! Mirrors `struct dm_target_spec` and `struct dm_target_versions` from
//! `<linux/dm-ioctl.h>`. All integers are host-endian, as the ioctl ABI is.

use dm_types::DM_MAX_TYPE_NAME;

use crate::{DmError, Result};

/// Records in a table load must start on this boundary (dm-ioctl v4)
pub const DEFAULT_ALIGNMENT: usize = 8;

/// Size of the fixed `dm_target_versions` prefix before the name
pub const VERSIONS_HEADER_SIZE: usize = 16;

/// Fixed header preceding every target's parameter string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpecHeader {
    pub sector_start: u64,
    pub length: u64,
    pub status: i32,
    /// Distance to the next record, filled in by whoever packs the table
    pub next: u32,
    pub target_type: [u8; DM_MAX_TYPE_NAME],
}

impl TargetSpecHeader {
    pub const SIZE: usize = 8 + 8 + 4 + 4 + DM_MAX_TYPE_NAME;

    /// Byte offset of `next` within the header
    pub const NEXT_OFFSET: usize = 20;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..8].copy_from_slice(&self.sector_start.to_ne_bytes());
        out[8..16].copy_from_slice(&self.length.to_ne_bytes());
        out[16..20].copy_from_slice(&self.status.to_ne_bytes());
        out[Self::NEXT_OFFSET..24].copy_from_slice(&self.next.to_ne_bytes());
        out[24..].copy_from_slice(&self.target_type);
        out
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(DmError::TruncatedRecord {
                offset: 0,
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }

        let mut target_type = [0u8; DM_MAX_TYPE_NAME];
        target_type.copy_from_slice(&bytes[24..Self::SIZE]);

        Ok(Self {
            sector_start: read_u64(bytes, 0),
            length: read_u64(bytes, 8),
            status: i32::from_ne_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]),
            next: read_u32(bytes, Self::NEXT_OFFSET),
            target_type,
        })
    }

    /// Target type with the NUL padding stripped
    pub fn type_name(&self) -> &[u8] {
        let end = self
            .target_type
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(DM_MAX_TYPE_NAME);
        &self.target_type[..end]
    }
}

pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_ne_bytes(raw)
}

pub(crate) fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_ne_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_kernel_struct_size() {
        assert_eq!(TargetSpecHeader::SIZE, 40);
        assert_eq!(TargetSpecHeader::SIZE % DEFAULT_ALIGNMENT, 0);
    }

    #[test]
    fn header_field_offsets() {
        let mut target_type = [0u8; DM_MAX_TYPE_NAME];
        target_type[..6].copy_from_slice(b"linear");
        let header = TargetSpecHeader {
            sector_start: 7,
            length: 9,
            status: 0,
            next: 0x11223344,
            target_type,
        };

        let bytes = header.to_bytes();
        assert_eq!(read_u64(&bytes, 0), 7);
        assert_eq!(read_u64(&bytes, 8), 9);
        assert_eq!(read_u32(&bytes, TargetSpecHeader::NEXT_OFFSET), 0x11223344);
        assert_eq!(&bytes[24..30], b"linear");

        let parsed = TargetSpecHeader::parse(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.type_name(), b"linear");
    }

    #[test]
    fn short_header_is_rejected() {
        let err = TargetSpecHeader::parse(&[0u8; 39]).unwrap_err();
        assert!(matches!(
            err,
            DmError::TruncatedRecord {
                needed: 40,
                available: 39,
                ..
            }
        ));
    }
}
