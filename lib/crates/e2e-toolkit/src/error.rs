use thiserror::Error;

/// Errors raised by toolkit conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolkitError {
    #[error("invalid 32-bit integer {input:?}: {reason}")]
    InvalidInt32 { input: String, reason: String },
}
