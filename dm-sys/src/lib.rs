// SPDX-License-Identifier: GPL-3.0-only

//! Device-mapper table entry encoding
//!
//! This crate turns in-memory target descriptions into the records the
//! kernel's `DM_TABLE_LOAD` ioctl consumes, and decodes the kernel's
//! `DM_LIST_VERSIONS` reply into target type information:
//! - `Target` / `TargetKind` model one table entry and serialize it
//! - `TableLayout` carries the record alignment used when packing a table
//! - `decode_versions` / `TargetVersions` read the capability query reply
//!
//! Issuing ioctls and assembling multi-target tables happen elsewhere.

pub mod error;
pub mod layout;
pub mod target;
pub mod versions;
pub mod wire;

pub use dm_types::{SectorRange, TargetName, TargetTypeInfo};
pub use error::{DmError, Result};
pub use layout::TableLayout;
pub use target::{
    Crypt, Custom, Linear, Snapshot, SnapshotMerge, SnapshotMode, SnapshotOrigin, Stripe, Striped,
    Target, TargetKind,
};
pub use versions::{decode_versions, encode_version_record, TargetVersions};
pub use wire::TargetSpecHeader;
