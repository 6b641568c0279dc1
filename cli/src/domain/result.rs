//! The provision result document written to `provision.json`.
//!
//! Keys are PascalCase and `ExitCode` is a decimal string, matching the
//! status record existing node tooling already parses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::outcome::{FailureClass, ProvisionOutcome};

/// Maximum number of bytes of script output kept in the document.
pub const OUTPUT_TAIL_BYTES: usize = 4096;

/// Structured record of one provisioning attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionResult {
    #[serde(with = "exit_code_string")]
    pub exit_code: i32,
    pub succeeded: bool,
    pub failure_class: FailureClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_exit_code: Option<i32>,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: String,
    pub exec_duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_start_time: Option<DateTime<Utc>>,
    #[serde(rename = "CSEStartTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "CSEEndTime")]
    pub end_time: DateTime<Utc>,
}

impl From<&ProvisionOutcome> for ProvisionResult {
    fn from(outcome: &ProvisionOutcome) -> Self {
        Self {
            exit_code: outcome.exit_code(),
            succeeded: outcome.succeeded(),
            failure_class: outcome.failure_class,
            script_exit_code: outcome.script_exit_code,
            output: tail(&outcome.output, OUTPUT_TAIL_BYTES).to_owned(),
            error: outcome.error_detail.clone().unwrap_or_default(),
            exec_duration: outcome.exec_duration_secs().to_string(),
            kernel_start_time: outcome.kernel_started_at,
            start_time: outcome.started_at,
            end_time: outcome.finished_at,
        }
    }
}

/// The last `max_bytes` of `text`, cut on a char boundary.
#[must_use]
pub fn tail(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

mod exit_code_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(code: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&code.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(D::Error::custom)
    }
}
