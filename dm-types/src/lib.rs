// SPDX-License-Identifier: GPL-3.0-only

//! Canonical data models for device-mapper tables
//!
//! These types carry no I/O and are shared by everything that builds or
//! inspects a mapping:
//!
//! - `SectorRange` → the sector span one table entry covers
//! - `TargetName` → a target type identifier that fits the kernel's name field
//! - `TargetTypeInfo` → a target driver and version reported by the kernel

pub mod common;
pub mod name;
pub mod target_type;

pub use common::{DM_MAX_TYPE_NAME, SECTOR_SIZE, SectorRange, sectors_to_bytes};
pub use name::{TargetName, TargetNameError};
pub use target_type::TargetTypeInfo;
