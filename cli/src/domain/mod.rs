//! Domain layer: provisioning outcome types, the result document, fixed
//! artifact paths, and config validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod boot;
pub mod config;
pub mod error;
pub mod outcome;
pub mod paths;
pub mod result;

pub use config::{DEFAULT_SCRIPT_PATH, DEFAULT_TIMEOUT_SECS, ProvisionConfig};
pub use error::{ConfigError, ProvisionError};
pub use outcome::{
    DEFAULT_OUTBOUND_MESSAGE, EXIT_OUTBOUND_CONNECTIVITY, EXIT_PROVISION_FAILED, EXIT_SUCCESS,
    FailureClass, ProvisionOutcome,
};
pub use paths::ProvisionPaths;
pub use result::ProvisionResult;
