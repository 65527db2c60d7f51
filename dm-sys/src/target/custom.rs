// SPDX-License-Identifier: GPL-3.0-only

use dm_types::TargetName;

use super::param;
use crate::Result;

/// A target type with no dedicated model, named at runtime
///
/// Used for drivers discovered through a version query, or ones this crate
/// does not model. The parameter string is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Custom {
    name: TargetName,
    params: String,
}

impl Custom {
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Result<Self> {
        let name = TargetName::new(name)?;
        let params = param(name.as_str(), params)?;
        Ok(Self { name, params })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn target_name(&self) -> &TargetName {
        &self.name
    }

    pub fn params(&self) -> &str {
        &self.params
    }
}
