//! Application service: waits for a provisioning attempt to finish.
//!
//! Polls for the completion marker and only then reads the result document;
//! the marker is written after the document is durable, so a document read
//! after seeing the marker is complete.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::ArtifactReader;
use crate::domain::{ProvisionError, ProvisionPaths, ProvisionResult};

/// Default interval between marker checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// The raw result document together with its parsed form.
#[derive(Debug, Clone)]
pub struct CompletedProvision {
    pub raw: String,
    pub result: ProvisionResult,
}

/// Wait until the completion marker exists, then return the result document.
///
/// # Errors
///
/// Returns [`ProvisionError::WaitTimedOut`] if the marker does not appear
/// within `timeout`, or an error if the document cannot be read or parsed.
pub async fn wait_for_completion(
    paths: &ProvisionPaths,
    reader: &impl ArtifactReader,
    poll_interval: Duration,
    timeout: Duration,
) -> Result<CompletedProvision> {
    let marker = paths.provision_complete();
    let waited = tokio::time::timeout(timeout, async {
        while !reader.exists(marker).await {
            tracing::debug!(marker = %marker.display(), "completion marker not present yet");
            tokio::time::sleep(poll_interval).await;
        }
    })
    .await;

    if waited.is_err() {
        return Err(ProvisionError::WaitTimedOut {
            path: marker.display().to_string(),
            secs: timeout.as_secs(),
        }
        .into());
    }

    let json_path = paths.provision_json();
    let raw = reader
        .read_to_string(json_path)
        .await
        .with_context(|| format!("reading {}", json_path.display()))?;
    let result: ProvisionResult = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", json_path.display()))?;

    tracing::info!(
        exit_code = result.exit_code,
        failure_class = %result.failure_class,
        "provisioning completed",
    );

    Ok(CompletedProvision { raw, result })
}
