//! Fixed on-disk locations of the provisioning artifacts.
//!
//! External tooling hard-codes these paths, so they are not exposed through
//! any flag, environment variable, or config key.

use std::path::{Path, PathBuf};

const AGENT_LOG: &str = "var/log/azure/aks-node-controller.log";
const PROVISION_JSON: &str = "var/log/azure/aks/provision.json";
const PROVISION_COMPLETE: &str = "opt/azure/containers/provision.complete";
const CLUSTER_PROVISION_LOG: &str = "var/log/azure/cluster-provision.log";
const OUTBOUND_ERROR_MESSAGE: &str = "var/log/azure/aks/outbound-command-error-message";

/// Artifact paths, built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPaths {
    agent_log: PathBuf,
    provision_json: PathBuf,
    provision_complete: PathBuf,
    cluster_provision_log: PathBuf,
    outbound_error_message: PathBuf,
}

impl ProvisionPaths {
    /// The production layout rooted at `/`.
    #[must_use]
    pub fn system() -> Self {
        Self::under(Path::new("/"))
    }

    /// The same fixed layout beneath `root` (tests, image-build chroots).
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            agent_log: root.join(AGENT_LOG),
            provision_json: root.join(PROVISION_JSON),
            provision_complete: root.join(PROVISION_COMPLETE),
            cluster_provision_log: root.join(CLUSTER_PROVISION_LOG),
            outbound_error_message: root.join(OUTBOUND_ERROR_MESSAGE),
        }
    }

    #[must_use]
    pub fn agent_log(&self) -> &Path {
        &self.agent_log
    }

    /// Structured result document (`provision.json`).
    #[must_use]
    pub fn provision_json(&self) -> &Path {
        &self.provision_json
    }

    /// Zero-byte completion marker (`provision.complete`).
    #[must_use]
    pub fn provision_complete(&self) -> &Path {
        &self.provision_complete
    }

    #[must_use]
    pub fn cluster_provision_log(&self) -> &Path {
        &self.cluster_provision_log
    }

    #[must_use]
    pub fn outbound_error_message(&self) -> &Path {
        &self.outbound_error_message
    }
}

impl Default for ProvisionPaths {
    fn default() -> Self {
        Self::system()
    }
}
