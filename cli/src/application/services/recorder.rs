//! Application service: records the outcome of a provisioning attempt.
//!
//! Artifacts are written in a fixed order: result document, then (only for
//! outbound connectivity failures) the error message, then the completion
//! marker. Watchers treat the marker as the commit point, so it must never
//! appear before the result document is durable.

use crate::application::ports::ArtifactStore;
use crate::domain::{FailureClass, ProvisionError, ProvisionOutcome, ProvisionPaths, ProvisionResult};

/// Progress of a single recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecordPhase {
    NotStarted,
    ResultWritten,
    ConnectivityErrorWritten,
    Completed,
}

/// What was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// Exit code the agent process must exit with.
    pub exit_code: i32,
    pub result: ProvisionResult,
    pub phase: RecordPhase,
}

/// Writes the provisioning artifact set. Consumed by [`record`](Self::record),
/// so one recorder records exactly one attempt.
pub struct ProvisioningResultRecorder<'a, S> {
    paths: &'a ProvisionPaths,
    store: &'a S,
    phase: RecordPhase,
}

impl<'a, S: ArtifactStore> ProvisioningResultRecorder<'a, S> {
    #[must_use]
    pub fn new(paths: &'a ProvisionPaths, store: &'a S) -> Self {
        Self {
            paths,
            store,
            phase: RecordPhase::NotStarted,
        }
    }

    /// Record `outcome` and return the exit code the agent should use.
    ///
    /// # Errors
    ///
    /// Any write failure stops the sequence immediately. A failed result
    /// document write leaves neither the error message nor the marker behind.
    pub async fn record(mut self, outcome: &ProvisionOutcome) -> Result<Recorded, ProvisionError> {
        let result = ProvisionResult::from(outcome);
        let json_path = self.paths.provision_json();
        let body = serde_json::to_vec_pretty(&result).map_err(|e| ProvisionError::ResultWrite {
            path: json_path.display().to_string(),
            source: e.into(),
        })?;
        self.store
            .write_durable(json_path, body)
            .await
            .map_err(|source| ProvisionError::ResultWrite {
                path: json_path.display().to_string(),
                source: source.into(),
            })?;
        self.advance(RecordPhase::ResultWritten);

        if outcome.failure_class == FailureClass::OutboundConnectivity {
            let message_path = self.paths.outbound_error_message();
            self.store
                .write_durable(message_path, outcome.connectivity_message().into_bytes())
                .await
                .map_err(|source| ProvisionError::ConnectivityMessageWrite {
                    path: message_path.display().to_string(),
                    source: source.into(),
                })?;
            self.advance(RecordPhase::ConnectivityErrorWritten);
        }

        let marker = self.paths.provision_complete();
        self.store
            .create_marker(marker)
            .await
            .map_err(|source| ProvisionError::MarkerWrite {
                path: marker.display().to_string(),
                source: source.into(),
            })?;
        self.advance(RecordPhase::Completed);

        tracing::info!(
            exit_code = result.exit_code,
            failure_class = %outcome.failure_class,
            exec_duration_secs = %result.exec_duration,
            "provisioning outcome recorded",
        );

        Ok(Recorded {
            exit_code: result.exit_code,
            result,
            phase: self.phase,
        })
    }

    fn advance(&mut self, next: RecordPhase) {
        debug_assert!(next > self.phase, "phase must move forward");
        tracing::debug!(from = ?self.phase, to = ?next, "provision status phase");
        self.phase = next;
    }
}
