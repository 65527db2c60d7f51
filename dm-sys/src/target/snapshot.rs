// SPDX-License-Identifier: GPL-3.0-only

use super::param;
use crate::Result;

/// Whether snapshot exceptions survive a reboot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    Persistent,
    Transient,
}

impl SnapshotMode {
    fn as_flag(self) -> &'static str {
        match self {
            SnapshotMode::Persistent => "P",
            SnapshotMode::Transient => "N",
        }
    }
}

/// Copy-on-write view of `base_device`, with changes stored on `cow_device`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    base_device: String,
    cow_device: String,
    mode: SnapshotMode,
    chunk_size: u64,
}

impl Snapshot {
    pub const NAME: &'static str = "snapshot";

    pub fn new(
        base_device: impl Into<String>,
        cow_device: impl Into<String>,
        mode: SnapshotMode,
        chunk_size: u64,
    ) -> Result<Self> {
        Ok(Self {
            base_device: param(Self::NAME, base_device)?,
            cow_device: param(Self::NAME, cow_device)?,
            mode,
            chunk_size,
        })
    }

    pub fn mode(&self) -> SnapshotMode {
        self.mode
    }

    pub(crate) fn parameter_string(&self) -> String {
        format!(
            "{} {} {} {}",
            self.base_device,
            self.cow_device,
            self.mode.as_flag(),
            self.chunk_size
        )
    }
}

/// Merges a persistent snapshot's exceptions back into its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMerge {
    base_device: String,
    cow_device: String,
    chunk_size: u64,
}

impl SnapshotMerge {
    pub const NAME: &'static str = "snapshot-merge";

    pub fn new(
        base_device: impl Into<String>,
        cow_device: impl Into<String>,
        chunk_size: u64,
    ) -> Result<Self> {
        Ok(Self {
            base_device: param(Self::NAME, base_device)?,
            cow_device: param(Self::NAME, cow_device)?,
            chunk_size,
        })
    }

    pub(crate) fn parameter_string(&self) -> String {
        // Merging is only defined for persistent exception stores.
        format!(
            "{} {} {} {}",
            self.base_device,
            self.cow_device,
            SnapshotMode::Persistent.as_flag(),
            self.chunk_size
        )
    }
}

/// The origin side of a snapshot pair; writes trigger copy-out to every snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOrigin {
    device: String,
}

impl SnapshotOrigin {
    pub const NAME: &'static str = "snapshot-origin";

    pub fn new(device: impl Into<String>) -> Result<Self> {
        Ok(Self {
            device: param(Self::NAME, device)?,
        })
    }

    pub(crate) fn parameter_string(&self) -> String {
        self.device.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DmError;

    #[test]
    fn snapshot_modes() {
        let persistent =
            Snapshot::new("/dev/base", "/dev/cow", SnapshotMode::Persistent, 8).unwrap();
        let transient =
            Snapshot::new("/dev/base", "/dev/cow", SnapshotMode::Transient, 16).unwrap();
        assert_eq!(persistent.parameter_string(), "/dev/base /dev/cow P 8");
        assert_eq!(transient.parameter_string(), "/dev/base /dev/cow N 16");
        assert_eq!(transient.mode(), SnapshotMode::Transient);
    }

    #[test]
    fn merge_is_always_persistent() {
        let merge = SnapshotMerge::new("/dev/base", "/dev/cow", 8).unwrap();
        assert_eq!(merge.parameter_string(), "/dev/base /dev/cow P 8");
    }

    #[test]
    fn origin_params_are_the_device() {
        assert_eq!(
            SnapshotOrigin::new("/dev/mapper/system")
                .unwrap()
                .parameter_string(),
            "/dev/mapper/system"
        );
    }

    fn nul_target<T>(result: Result<T>) -> Option<String> {
        match result {
            Err(DmError::ParameterContainsNul { target }) => Some(target),
            _ => None,
        }
    }

    #[test]
    fn snapshot_variants_reject_nul() {
        assert_eq!(
            nul_target(Snapshot::new("/dev/base\0", "/dev/cow", SnapshotMode::Persistent, 8)),
            Some("snapshot".to_string())
        );
        assert_eq!(
            nul_target(SnapshotMerge::new("/dev/base", "/dev/\0cow", 8)),
            Some("snapshot-merge".to_string())
        );
        assert_eq!(
            nul_target(SnapshotOrigin::new("/dev/mapper/sys\0tem")),
            Some("snapshot-origin".to_string())
        );
    }
}
