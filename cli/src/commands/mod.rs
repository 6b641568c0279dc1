//! Command implementations

pub mod provision;
pub mod provision_wait;
pub mod version;

use std::process::ExitCode;

use crate::domain::EXIT_PROVISION_FAILED;

/// Convert a recorded exit code into a process exit code.
///
/// Codes outside `0..=255` collapse to the generic failure code.
#[must_use]
pub fn process_exit_code(code: i32) -> ExitCode {
    u8::try_from(code)
        .or_else(|_| u8::try_from(EXIT_PROVISION_FAILED))
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
