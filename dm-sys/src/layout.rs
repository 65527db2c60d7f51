// SPDX-License-Identifier: GPL-3.0-only

//! Table packing parameters
//!
//! The alignment between records belongs to the kernel interface version in
//! use, so it is configurable rather than hard-coded. A layout file is TOML:
//!
//! ```toml
//! alignment = 8
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::wire::DEFAULT_ALIGNMENT;
use crate::{DmError, Result};

/// Record alignment for a packed table; always a non-zero power of two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTableLayout")]
pub struct TableLayout {
    alignment: usize,
}

/// Unchecked form of the layout file
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawTableLayout {
    alignment: usize,
}

impl Default for RawTableLayout {
    fn default() -> Self {
        Self {
            alignment: DEFAULT_ALIGNMENT,
        }
    }
}

impl TryFrom<RawTableLayout> for TableLayout {
    type Error = DmError;

    fn try_from(raw: RawTableLayout) -> Result<Self> {
        Self::new(raw.alignment)
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            alignment: DEFAULT_ALIGNMENT,
        }
    }
}

impl TableLayout {
    pub fn new(alignment: usize) -> Result<Self> {
        if !alignment.is_power_of_two() {
            return Err(DmError::InvalidAlignment(alignment));
        }
        Ok(Self { alignment })
    }

    /// Byte boundary each record must be padded to
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let raw: RawTableLayout = toml::from_str(raw).map_err(|error| DmError::Config {
            path: "<inline>".into(),
            reason: error.to_string(),
        })?;
        Self::new(raw.alignment)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading table layout from {:?}", path);

        let raw = fs::read_to_string(path).map_err(|error| DmError::Config {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        let raw: RawTableLayout = toml::from_str(&raw).map_err(|error| DmError::Config {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        Self::new(raw.alignment)
    }

    /// Round `len` up to the next alignment boundary
    pub fn padded_len(&self, len: usize) -> usize {
        len.next_multiple_of(self.alignment)
    }

    /// Number of NUL bytes to append after a record of `len` bytes
    pub fn padding_for(&self, len: usize) -> usize {
        self.padded_len(len) - len
    }
}
