//! Target driver capability information reported by the kernel

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::name::TargetName;

/// One target driver the running kernel knows about, with its version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetTypeInfo {
    name: TargetName,
    major: u32,
    minor: u32,
    patch: u32,
}

impl TargetTypeInfo {
    /// Build from a name and the kernel's `[major, minor, patch]` version array
    pub fn new(name: TargetName, version: [u32; 3]) -> Self {
        let [major, minor, patch] = version;
        Self {
            name,
            major,
            minor,
            patch,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Dotted version string, e.g. `"1.3.0"`
    pub fn version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn version_tuple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    /// Check whether the driver is at least the given version
    pub fn is_at_least(&self, major: u32, minor: u32, patch: u32) -> bool {
        self.version_tuple() >= (major, minor, patch)
    }
}

impl fmt::Display for TargetTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, version: [u32; 3]) -> TargetTypeInfo {
        TargetTypeInfo::new(TargetName::new(name).unwrap(), version)
    }

    #[test]
    fn version_is_dotted_decimal() {
        assert_eq!(info("linear", [1, 3, 0]).version(), "1.3.0");
        assert_eq!(info("crypt", [1, 24, 107]).version(), "1.24.107");
        assert_eq!(
            info("zero", [u32::MAX, 0, 7]).version(),
            format!("{}.0.7", u32::MAX)
        );
    }

    #[test]
    fn name_is_returned_unchanged() {
        let target = info("snapshot-origin", [1, 9, 0]);
        assert_eq!(target.name(), "snapshot-origin");
        assert_eq!(target.to_string(), "snapshot-origin v1.9.0");
    }

    #[test]
    fn version_comparison_is_lexicographic() {
        let target = info("verity", [1, 4, 2]);
        assert!(target.is_at_least(1, 4, 2));
        assert!(target.is_at_least(1, 3, 9));
        assert!(target.is_at_least(0, 99, 99));
        assert!(!target.is_at_least(1, 4, 3));
        assert!(!target.is_at_least(2, 0, 0));
    }

    #[test]
    fn serde_roundtrip_target_type_info() {
        let target = info("striped", [1, 6, 0]);
        let json = serde_json::to_string(&target).expect("serialize info");
        let parsed: TargetTypeInfo = serde_json::from_str(&json).expect("deserialize info");
        assert_eq!(parsed, target);
        assert_eq!(parsed.version_tuple(), (1, 6, 0));
    }
}
