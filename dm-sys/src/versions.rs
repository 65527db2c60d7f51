// SPDX-License-Identifier: GPL-3.0-only

//! Decoding of the kernel's `DM_LIST_VERSIONS` reply
//!
//! The payload is a chain of `dm_target_versions` records: a `next` distance,
//! a `[major, minor, patch]` triple and a NUL-terminated name. The last record
//! has `next == 0`.
//!
//! A record whose name cannot be used as a target type (empty, or too long
//! for the 16-byte table field) is skipped with a warning; the rest of the
//! list is still returned. Structural damage rejects the whole reply.

use dm_types::{TargetName, TargetTypeInfo};
use tracing::{trace, warn};

use crate::wire::{read_u32, VERSIONS_HEADER_SIZE};
use crate::{DmError, Result};

/// Decode every target type in a `DM_LIST_VERSIONS` payload
pub fn decode_versions(buf: &[u8]) -> Result<Vec<TargetTypeInfo>> {
    let result = decode_chain(buf);
    if let Err(e) = &result {
        warn!("Rejected target version list: {}", e);
    }
    result
}

fn decode_chain(buf: &[u8]) -> Result<Vec<TargetTypeInfo>> {
    let mut targets = Vec::new();
    if buf.is_empty() {
        return Ok(targets);
    }

    let mut offset = 0usize;
    loop {
        let (info, record_len, next) = decode_record(buf, offset)?;
        if let Some(info) = info {
            trace!("Decoded target type {} at offset {}", info, offset);
            targets.push(info);
        }

        if next == 0 {
            break;
        }
        if (next as usize) < record_len {
            return Err(DmError::BadNextOffset { offset, next });
        }
        offset = offset
            .checked_add(next as usize)
            .ok_or(DmError::BadNextOffset { offset, next })?;
    }

    Ok(targets)
}

/// Returns the decoded record (`None` if its name is unusable), its unpadded
/// length and its `next` field
fn decode_record(buf: &[u8], offset: usize) -> Result<(Option<TargetTypeInfo>, usize, u32)> {
    let available = buf.len().saturating_sub(offset);
    if available < VERSIONS_HEADER_SIZE {
        return Err(DmError::TruncatedRecord {
            offset,
            needed: VERSIONS_HEADER_SIZE,
            available,
        });
    }

    let next = read_u32(buf, offset);
    let version = [
        read_u32(buf, offset + 4),
        read_u32(buf, offset + 8),
        read_u32(buf, offset + 12),
    ];

    let name_start = offset + VERSIONS_HEADER_SIZE;
    let name_len = buf[name_start..]
        .iter()
        .position(|b| *b == 0)
        .ok_or(DmError::UnterminatedName { offset })?;
    let name = std::str::from_utf8(&buf[name_start..name_start + name_len])
        .map_err(|_| DmError::NameNotUtf8 { offset })?;
    let record_len = VERSIONS_HEADER_SIZE + name_len + 1;

    let info = match TargetName::new(name) {
        Ok(name) => Some(TargetTypeInfo::new(name, version)),
        Err(e) => {
            warn!("Skipping target type at offset {}: {}", offset, e);
            None
        }
    };

    Ok((info, record_len, next))
}

/// Encode one `dm_target_versions` record, unpadded
pub fn encode_version_record(info: &TargetTypeInfo, next: u32) -> Vec<u8> {
    let mut record = Vec::with_capacity(VERSIONS_HEADER_SIZE + info.name().len() + 1);
    record.extend_from_slice(&next.to_ne_bytes());
    record.extend_from_slice(&info.major().to_ne_bytes());
    record.extend_from_slice(&info.minor().to_ne_bytes());
    record.extend_from_slice(&info.patch().to_ne_bytes());
    record.extend_from_slice(info.name().as_bytes());
    record.push(0);
    record
}

/// Target drivers supported by the running kernel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetVersions {
    targets: Vec<TargetTypeInfo>,
}

impl TargetVersions {
    pub fn decode(buf: &[u8]) -> Result<Self> {
        Ok(Self {
            targets: decode_versions(buf)?,
        })
    }

    pub fn get(&self, name: &str) -> Option<&TargetTypeInfo> {
        self.targets.iter().find(|info| info.name() == name)
    }

    /// Check whether `name` is available at the given version or newer
    pub fn supports(&self, name: &str, major: u32, minor: u32, patch: u32) -> bool {
        self.get(name)
            .is_some_and(|info| info.is_at_least(major, minor, patch))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetTypeInfo> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl From<Vec<TargetTypeInfo>> for TargetVersions {
    fn from(targets: Vec<TargetTypeInfo>) -> Self {
        Self { targets }
    }
}
