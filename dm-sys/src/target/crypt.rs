// SPDX-License-Identifier: GPL-3.0-only

use super::param;
use crate::Result;

/// Transparent encryption on top of another block device
///
/// Only the table arguments are modelled here; key handling is the caller's
/// business and the key (or keyring reference) is emitted as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crypt {
    cipher: String,
    key: String,
    iv_offset: u64,
    device: String,
    device_sector: u64,
    allow_discards: bool,
    allow_encrypt_override: bool,
    iv_large_sectors: bool,
    sector_size: Option<u32>,
}

impl Crypt {
    pub const NAME: &'static str = "crypt";

    pub fn new(
        cipher: impl Into<String>,
        key: impl Into<String>,
        iv_offset: u64,
        device: impl Into<String>,
        device_sector: u64,
    ) -> Result<Self> {
        Ok(Self {
            cipher: param(Self::NAME, cipher)?,
            key: param(Self::NAME, key)?,
            iv_offset,
            device: param(Self::NAME, device)?,
            device_sector,
            allow_discards: false,
            allow_encrypt_override: false,
            iv_large_sectors: false,
            sector_size: None,
        })
    }

    pub fn allow_discards(mut self) -> Self {
        self.allow_discards = true;
        self
    }

    pub fn allow_encrypt_override(mut self) -> Self {
        self.allow_encrypt_override = true;
        self
    }

    pub fn iv_large_sectors(mut self) -> Self {
        self.iv_large_sectors = true;
        self
    }

    /// Encryption sector size in bytes
    pub fn sector_size(mut self, bytes: u32) -> Self {
        self.sector_size = Some(bytes);
        self
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn cipher(&self) -> &str {
        &self.cipher
    }

    pub(crate) fn parameter_string(&self) -> String {
        let mut params = format!(
            "{} {} {} {} {}",
            self.cipher, self.key, self.iv_offset, self.device, self.device_sector
        );

        let mut extra = Vec::new();
        if self.allow_discards {
            extra.push("allow_discards".to_string());
        }
        if self.allow_encrypt_override {
            extra.push("allow_encrypt_override".to_string());
        }
        if self.iv_large_sectors {
            extra.push("iv_large_sectors".to_string());
        }
        if let Some(size) = self.sector_size {
            extra.push(format!("sector_size:{size}"));
        }

        if !extra.is_empty() {
            params.push_str(&format!(" {} {}", extra.len(), extra.join(" ")));
        }
        params
    }
}
