//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

/// Boxed cause carried by errors that wrap I/O failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while validating a provision config file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported provision config version '{0}'. Expected 'v1'.")]
    UnsupportedVersion(String),

    #[error("timeoutSecs must be greater than zero")]
    ZeroTimeout,

    #[error("Invalid environment variable name '{0}': must match ^[A-Za-z_][A-Za-z0-9_]*$")]
    InvalidEnvName(String),

    #[error("scriptPath must be an absolute path, got '{0}'")]
    RelativeScriptPath(String),
}

// ── Provision errors ──────────────────────────────────────────────────────────

/// Errors from the provisioning status protocol itself.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to write provision result to {path}")]
    ResultWrite {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write outbound connectivity message to {path}")]
    ConnectivityMessageWrite {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to create completion marker {path}")]
    MarkerWrite {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("timed out after {secs}s waiting for {path}")]
    WaitTimedOut { path: String, secs: u64 },
}
