// SPDX-License-Identifier: GPL-3.0-only

use super::param;
use crate::Result;

/// Maps the range onto a contiguous region of another block device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linear {
    block_device: String,
    physical_sector: u64,
}

impl Linear {
    pub const NAME: &'static str = "linear";

    /// `block_device` is passed to the kernel verbatim; it may be a path or `major:minor`.
    pub fn new(block_device: impl Into<String>, physical_sector: u64) -> Result<Self> {
        Ok(Self {
            block_device: param(Self::NAME, block_device)?,
            physical_sector,
        })
    }

    pub fn block_device(&self) -> &str {
        &self.block_device
    }

    pub fn physical_sector(&self) -> u64 {
        self.physical_sector
    }

    pub(crate) fn parameter_string(&self) -> String {
        format!("{} {}", self.block_device, self.physical_sector)
    }
}

/// One leg of a striped target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripe {
    pub device: String,
    pub offset: u64,
}

/// Spreads the range across several devices in `chunk_size`-sector chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Striped {
    chunk_size: u64,
    stripes: Vec<Stripe>,
}

impl Striped {
    pub const NAME: &'static str = "striped";

    pub fn new(chunk_size: u64) -> Self {
        Self {
            chunk_size,
            stripes: Vec::new(),
        }
    }

    pub fn add_stripe(mut self, device: impl Into<String>, offset: u64) -> Result<Self> {
        self.stripes.push(Stripe {
            device: param(Self::NAME, device)?,
            offset,
        });
        Ok(self)
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn stripes(&self) -> &[Stripe] {
        &self.stripes
    }

    pub(crate) fn parameter_string(&self) -> String {
        let mut params = format!("{} {}", self.stripes.len(), self.chunk_size);
        for stripe in &self.stripes {
            params.push_str(&format!(" {} {}", stripe.device, stripe.offset));
        }
        params
    }
}
