//! Provisioning outcome and failure classification.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exit code of a successful attempt.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code shared by every failure that is not an outbound connectivity failure.
pub const EXIT_PROVISION_FAILED: i32 = 1;

/// Reserved exit code for outbound connectivity failures. Mirrors
/// `ERR_OUTBOUND_CONN_FAIL` in the node shell helpers.
pub const EXIT_OUTBOUND_CONNECTIVITY: i32 = 50;

/// Message written when an outbound connectivity failure carries no detail.
pub const DEFAULT_OUTBOUND_MESSAGE: &str =
    "node could not reach required outbound endpoints during provisioning";

/// How a provisioning attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureClass {
    None,
    OutboundConnectivity,
    Other,
}

impl FailureClass {
    /// Classify from the provisioning script's exit code.
    ///
    /// `None` (killed, timed out, never spawned) counts as a generic failure.
    #[must_use]
    pub fn from_script_exit(code: Option<i32>) -> Self {
        match code {
            Some(EXIT_SUCCESS) => Self::None,
            Some(EXIT_OUTBOUND_CONNECTIVITY) => Self::OutboundConnectivity,
            _ => Self::Other,
        }
    }

    /// Process exit code for this class. Only `OutboundConnectivity` maps to 50.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::None => EXIT_SUCCESS,
            Self::OutboundConnectivity => EXIT_OUTBOUND_CONNECTIVITY,
            Self::Other => EXIT_PROVISION_FAILED,
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::OutboundConnectivity => "outbound-connectivity",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Everything the recorder needs to know about a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOutcome {
    pub failure_class: FailureClass,
    pub error_detail: Option<String>,
    /// Raw exit code of the provisioning script, when it exited normally.
    pub script_exit_code: Option<i32>,
    /// Tail of the script output.
    pub output: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub kernel_started_at: Option<DateTime<Utc>>,
}

impl ProvisionOutcome {
    /// A successful attempt.
    #[must_use]
    pub fn success(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        Self {
            failure_class: FailureClass::None,
            error_detail: None,
            script_exit_code: Some(EXIT_SUCCESS),
            output: String::new(),
            started_at,
            finished_at,
            kernel_started_at: None,
        }
    }

    /// A failed attempt of the given class.
    #[must_use]
    pub fn failure(
        failure_class: FailureClass,
        error_detail: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            failure_class,
            error_detail: Some(error_detail.into()),
            script_exit_code: None,
            output: String::new(),
            started_at,
            finished_at,
            kernel_started_at: None,
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failure_class == FailureClass::None
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.failure_class.exit_code()
    }

    /// Text for the outbound connectivity message file; never empty.
    #[must_use]
    pub fn connectivity_message(&self) -> String {
        match self.error_detail.as_deref().map(str::trim) {
            Some(detail) if !detail.is_empty() => detail.to_owned(),
            _ => DEFAULT_OUTBOUND_MESSAGE.to_owned(),
        }
    }

    /// Whole seconds between start and finish, clamped at zero.
    #[must_use]
    pub fn exec_duration_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }
}
