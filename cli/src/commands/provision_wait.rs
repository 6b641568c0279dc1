//! `aks-node-controller provision-wait`: block until provisioning finishes.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::provision_wait::{DEFAULT_POLL_INTERVAL, wait_for_completion};
use crate::commands::process_exit_code;
use crate::domain::DEFAULT_TIMEOUT_SECS;

/// Arguments for the provision-wait command.
#[derive(Args)]
pub struct ProvisionWaitArgs {
    /// Give up after this many seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Run `aks-node-controller provision-wait`.
///
/// Prints the result document and exits with the exit code it records.
///
/// # Errors
///
/// Returns an error on timeout or if the result document is unreadable.
pub async fn run(app: &AppContext, args: &ProvisionWaitArgs) -> Result<ExitCode> {
    let completed = wait_for_completion(
        &app.paths,
        &app.fs,
        DEFAULT_POLL_INTERVAL,
        Duration::from_secs(args.timeout_secs),
    )
    .await?;

    println!("{}", completed.raw.trim_end());
    Ok(process_exit_code(completed.result.exit_code))
}
