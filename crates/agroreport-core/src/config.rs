use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

pub const DEFAULT_ORGANIZATION: &str = "AGROFLY";
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 10 * 1024 * 1024;

pub const ORGANIZATION_ENV: &str = "AGROREPORT_ORGANIZATION";
pub const MAX_ARCHIVE_BYTES_ENV: &str = "AGROREPORT_MAX_ARCHIVE_BYTES";

/// Settings for one report run.
///
/// Loaded from TOML, then layered with environment overrides; every field has a default, so an
/// empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Name printed in the branding band of every document.
    pub organization: String,
    /// Largest archive, in bytes, that will be handed over for download.
    pub max_archive_bytes: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| ReportError::Config(format!("invalid config: {err}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Applies overrides from a variable lookup (normally `std::env::var`).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(organization) = lookup(ORGANIZATION_ENV) {
            self.organization = organization;
        }
        if let Some(raw) = lookup(MAX_ARCHIVE_BYTES_ENV) {
            self.max_archive_bytes = raw.trim().parse::<u64>().map_err(|err| {
                ReportError::Config(format!("{MAX_ARCHIVE_BYTES_ENV}='{raw}' is not a byte count: {err}"))
            })?;
        }
        Ok(self)
    }

    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Organization name as printed: trimmed, upper-cased, default when blank.
    pub fn display_organization(&self) -> String {
        match self.organization.trim() {
            "" => DEFAULT_ORGANIZATION.to_string(),
            name => name.to_uppercase(),
        }
    }
}
