//! Provision config schema and validation.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const SUPPORTED_VERSION: &str = "v1";
pub const DEFAULT_SCRIPT_PATH: &str = "/opt/azure/containers/provision_start.sh";
pub const DEFAULT_TIMEOUT_SECS: u64 = 900;

// ── Config schema ────────────────────────────────────────────────────────────

/// Contents of the file passed via `--provision-config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionConfig {
    pub version: String,
    #[serde(default = "default_script_path")]
    pub script_path: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Variables exported to the provisioning script.
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

fn default_script_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCRIPT_PATH)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ProvisionConfig {
    /// Check the config is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !self.script_path.is_absolute() {
            return Err(ConfigError::RelativeScriptPath(
                self.script_path.display().to_string(),
            ));
        }
        if let Some(bad) = self.environment.keys().find(|k| !is_env_name(k)) {
            return Err(ConfigError::InvalidEnvName(bad.clone()));
        }
        Ok(())
    }
}

fn is_env_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
