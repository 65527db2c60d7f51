// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use dm_types::TargetNameError;
use thiserror::Error;

/// Error types for device-mapper record encoding and decoding
#[derive(Error, Debug)]
pub enum DmError {
    #[error("invalid target name: {0}")]
    InvalidName(#[from] TargetNameError),

    #[error("parameters for target {target} contain a NUL byte")]
    ParameterContainsNul { target: String },

    #[error("record at offset {offset} needs {needed} bytes, only {available} available")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("target name at offset {offset} is not NUL-terminated")]
    UnterminatedName { offset: usize },

    #[error("target name at offset {offset} is not valid UTF-8")]
    NameNotUtf8 { offset: usize },

    #[error("record at offset {offset} has invalid next offset {next}")]
    BadNextOffset { offset: usize, next: u32 },

    #[error("alignment {0} is not a non-zero power of two")]
    InvalidAlignment(usize),

    #[error("invalid layout config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for device-mapper operations
pub type Result<T> = std::result::Result<T, DmError>;
