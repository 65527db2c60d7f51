// SPDX-License-Identifier: GPL-3.0-only

//! Table entries and their kernel encoding
//!
//! A [`Target`] owns the sector range it maps and a [`TargetKind`] that
//! supplies the type name and parameter string. The record layout is
//! produced once, by [`Target::serialize`], for every kind.

mod basic;
mod crypt;
mod custom;
mod snapshot;

pub use basic::{Linear, Stripe, Striped};
pub use crypt::Crypt;
pub use custom::Custom;
pub use snapshot::{Snapshot, SnapshotMerge, SnapshotMode, SnapshotOrigin};

use dm_types::SectorRange;
use tracing::debug;

use crate::wire::TargetSpecHeader;
use crate::{DmError, Result};

/// Take ownership of one argument of a `target` table entry.
///
/// The kernel reads parameters as a C string, so a NUL would silently cut
/// the argument list short.
pub(crate) fn param(target: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.contains('\0') {
        return Err(DmError::ParameterContainsNul {
            target: target.to_string(),
        });
    }
    Ok(value)
}

/// Handler selected for a table entry, with its handler-specific arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// Reads return zeroes, writes are discarded
    Zero,
    /// Every I/O fails
    Error,
    Linear(Linear),
    Striped(Striped),
    Crypt(Crypt),
    Snapshot(Snapshot),
    SnapshotMerge(SnapshotMerge),
    SnapshotOrigin(SnapshotOrigin),
    Custom(Custom),
}

impl TargetKind {
    pub fn name(&self) -> &str {
        match self {
            TargetKind::Zero => "zero",
            TargetKind::Error => "error",
            TargetKind::Linear(_) => Linear::NAME,
            TargetKind::Striped(_) => Striped::NAME,
            TargetKind::Crypt(_) => Crypt::NAME,
            TargetKind::Snapshot(_) => Snapshot::NAME,
            TargetKind::SnapshotMerge(_) => SnapshotMerge::NAME,
            TargetKind::SnapshotOrigin(_) => SnapshotOrigin::NAME,
            TargetKind::Custom(custom) => custom.name(),
        }
    }

    pub(crate) fn parameter_string(&self) -> String {
        match self {
            TargetKind::Zero | TargetKind::Error => String::new(),
            TargetKind::Linear(linear) => linear.parameter_string(),
            TargetKind::Striped(striped) => striped.parameter_string(),
            TargetKind::Crypt(crypt) => crypt.parameter_string(),
            TargetKind::Snapshot(snapshot) => snapshot.parameter_string(),
            TargetKind::SnapshotMerge(merge) => merge.parameter_string(),
            TargetKind::SnapshotOrigin(origin) => origin.parameter_string(),
            TargetKind::Custom(custom) => custom.params().to_string(),
        }
    }

    /// NUL-padded copy of the name for the header's fixed field
    fn name_field(&self) -> [u8; dm_types::DM_MAX_TYPE_NAME] {
        match self {
            TargetKind::Custom(custom) => custom.target_name().to_field(),
            other => {
                // Built-in names are literals well under the field width.
                let mut field = [0u8; dm_types::DM_MAX_TYPE_NAME];
                let name = other.name().as_bytes();
                field[..name.len()].copy_from_slice(name);
                field
            }
        }
    }
}

macro_rules! impl_from_kind {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for TargetKind {
                fn from(value: $ty) -> Self {
                    TargetKind::$ty(value)
                }
            }
        )*
    };
}

impl_from_kind!(
    Linear,
    Striped,
    Crypt,
    Snapshot,
    SnapshotMerge,
    SnapshotOrigin,
    Custom
);

/// One entry of a device-mapper table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    start: u64,
    length: u64,
    kind: TargetKind,
}

impl Target {
    /// Map `length` sectors starting at logical sector `start` with the given handler.
    ///
    /// Zero-length entries are accepted here; rejecting them is up to whoever
    /// assembles the table.
    pub fn new(start: u64, length: u64, kind: impl Into<TargetKind>) -> Self {
        Self {
            start,
            length,
            kind: kind.into(),
        }
    }

    pub fn zero(start: u64, length: u64) -> Self {
        Self::new(start, length, TargetKind::Zero)
    }

    pub fn error(start: u64, length: u64) -> Self {
        Self::new(start, length, TargetKind::Error)
    }

    pub fn linear(
        start: u64,
        length: u64,
        block_device: impl Into<String>,
        physical_sector: u64,
    ) -> Result<Self> {
        Ok(Self::new(
            start,
            length,
            Linear::new(block_device, physical_sector)?,
        ))
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// First logical sector represented by this target
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Number of sectors this target covers
    pub fn size(&self) -> u64 {
        self.length
    }

    pub fn range(&self) -> SectorRange {
        SectorRange::new(self.start, self.length)
    }

    pub fn kind(&self) -> &TargetKind {
        &self.kind
    }

    /// Encode this target as a `dm_target_spec` record followed by its
    /// NUL-terminated parameter string.
    ///
    /// The record is not padded and `next` is left at zero: both depend on
    /// where the record lands in the packed table. Callers pad each record
    /// to the table alignment (see [`crate::TableLayout`]) and patch `next`
    /// at [`TargetSpecHeader::NEXT_OFFSET`].
    pub fn serialize(&self) -> Vec<u8> {
        let params = self.kind.parameter_string();

        let header = TargetSpecHeader {
            sector_start: self.start,
            length: self.length,
            status: 0,
            next: 0,
            target_type: self.kind.name_field(),
        };

        let mut record = Vec::with_capacity(TargetSpecHeader::SIZE + params.len() + 1);
        record.extend_from_slice(&header.to_bytes());
        record.extend_from_slice(params.as_bytes());
        record.push(0);

        debug!(
            "Serialized {} target: start={} length={} record_len={}",
            self.name(),
            self.start,
            self.length,
            record.len()
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_of(record: &[u8]) -> &[u8] {
        let tail = &record[TargetSpecHeader::SIZE..];
        assert_eq!(tail.last(), Some(&0), "parameter string must be NUL-terminated");
        &tail[..tail.len() - 1]
    }

    #[test]
    fn zero_target_record() {
        let target = Target::zero(0, 1024);
        let record = target.serialize();

        let header = TargetSpecHeader::parse(&record).unwrap();
        assert_eq!(header.sector_start, 0);
        assert_eq!(header.length, 1024);
        assert_eq!(header.status, 0);
        assert_eq!(header.next, 0);
        assert_eq!(header.type_name(), b"zero");
        assert_eq!(params_of(&record), b"");
        assert_eq!(record.len(), TargetSpecHeader::SIZE + 1);
    }

    #[test]
    fn linear_target_record() {
        let target = Target::linear(0, 2048, "/dev/block/sda1", 512).unwrap();
        let record = target.serialize();

        let header = TargetSpecHeader::parse(&record).unwrap();
        assert_eq!(header.length, 2048);
        assert_eq!(header.type_name(), b"linear");
        assert_eq!(params_of(&record), b"/dev/block/sda1 512");
    }

    #[test]
    fn serialize_is_idempotent() {
        let target = Target::linear(4096, 8, "/dev/sdb", 0).unwrap();
        assert_eq!(target.serialize(), target.serialize());
    }

    #[test]
    fn accessors_return_constructor_arguments() {
        let target = Target::error(123, 456);
        let _ = target.serialize();
        assert_eq!(target.start(), 123);
        assert_eq!(target.size(), 456);
        assert_eq!(target.range(), SectorRange::new(123, 456));
    }

    #[test]
    fn zero_length_is_not_rejected_here() {
        let record = Target::zero(10, 0).serialize();
        assert_eq!(TargetSpecHeader::parse(&record).unwrap().length, 0);
    }

    #[test]
    fn names_do_not_depend_on_arguments() {
        assert_eq!(Target::zero(0, 1).name(), Target::zero(99, 5000).name());
        assert_eq!(
            Target::linear(0, 1, "/dev/a", 0).unwrap().name(),
            Target::linear(8, 16, "/dev/mapper/b", 1 << 40).unwrap().name()
        );
        assert_eq!(Target::error(0, 1).name(), "error");
    }

    #[test]
    fn nul_in_device_is_rejected_before_serializing() {
        let err = Target::linear(0, 8, "/dev/sda\0evil", 0).unwrap_err();
        assert!(matches!(err, DmError::ParameterContainsNul { target } if target == "linear"));
    }

    #[test]
    fn custom_name_fills_header() {
        let custom = Custom::new("verity", "1 /dev/a /dev/b").unwrap();
        let record = Target::new(0, 64, custom).serialize();
        assert_eq!(TargetSpecHeader::parse(&record).unwrap().type_name(), b"verity");
        assert_eq!(params_of(&record), b"1 /dev/a /dev/b");
    }
}
