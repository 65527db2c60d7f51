//! Validated target type names
//!
//! The kernel copies a target type into a fixed 16-byte field and looks it up
//! as a C string, so every name must fit with room for its terminating NUL.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::DM_MAX_TYPE_NAME;

/// Reasons a string cannot be used as a target type name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetNameError {
    #[error("target type name is empty")]
    Empty,

    #[error("target type name {name:?} is {len} bytes, limit is {limit}", limit = DM_MAX_TYPE_NAME - 1)]
    TooLong { name: String, len: usize },

    #[error("target type name {0:?} contains a NUL byte")]
    EmbeddedNul(String),
}

/// Target type identifier such as `linear` or `zero`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetName(String);

impl TargetName {
    pub fn new(name: impl Into<String>) -> Result<Self, TargetNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TargetNameError::Empty);
        }
        if name.contains('\0') {
            return Err(TargetNameError::EmbeddedNul(name));
        }
        if name.len() >= DM_MAX_TYPE_NAME {
            let len = name.len();
            return Err(TargetNameError::TooLong { name, len });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// NUL-padded copy of the name as laid out in `dm_target_spec.target_type`
    pub fn to_field(&self) -> [u8; DM_MAX_TYPE_NAME] {
        let mut field = [0u8; DM_MAX_TYPE_NAME];
        field[..self.0.len()].copy_from_slice(self.0.as_bytes());
        field
    }
}

impl TryFrom<String> for TargetName {
    type Error = TargetNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetName> for String {
    fn from(value: TargetName) -> Self {
        value.0
    }
}

impl AsRef<str> for TargetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_kernel_names() {
        for name in ["zero", "linear", "snapshot-origin", "snapshot-merge"] {
            assert_eq!(TargetName::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_names_without_room_for_nul() {
        assert!(TargetName::new("a".repeat(15)).is_ok());
        assert_eq!(
            TargetName::new("a".repeat(16)),
            Err(TargetNameError::TooLong {
                name: "a".repeat(16),
                len: 16
            })
        );
    }

    #[test]
    fn rejects_empty_and_nul() {
        assert_eq!(TargetName::new(""), Err(TargetNameError::Empty));
        assert!(matches!(
            TargetName::new("li\0near"),
            Err(TargetNameError::EmbeddedNul(_))
        ));
    }

    #[test]
    fn field_is_nul_padded() {
        let field = TargetName::new("zero").unwrap().to_field();
        assert_eq!(&field[..4], b"zero");
        assert!(field[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn deserialize_validates() {
        let parsed: TargetName = serde_json::from_str("\"crypt\"").expect("valid name");
        assert_eq!(parsed.as_str(), "crypt");
        assert!(serde_json::from_str::<TargetName>("\"\"").is_err());
    }
}
