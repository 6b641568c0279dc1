//! `aks-node-controller provision`: run one provisioning attempt.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::provision::run_attempt;
use crate::application::services::recorder::ProvisioningResultRecorder;
use crate::commands::process_exit_code;

/// Arguments for the provision command.
#[derive(Args)]
pub struct ProvisionArgs {
    /// Path to the provision config file (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub provision_config: PathBuf,
}

/// Run `aks-node-controller provision`.
///
/// The exit code is 0 on success, 50 for an outbound connectivity failure
/// and 1 for any other failure.
///
/// # Errors
///
/// Returns an error only when the outcome itself cannot be recorded.
pub async fn run(app: &AppContext, args: &ProvisionArgs) -> Result<ExitCode> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.provision_config.display(),
        "aks-node-controller provision starting",
    );

    let outcome = run_attempt(
        &app.paths,
        &args.provision_config,
        &app.config,
        &app.runner,
        &app.fs,
    )
    .await;

    let recorded = ProvisioningResultRecorder::new(&app.paths, &app.fs)
        .record(&outcome)
        .await?;

    Ok(process_exit_code(recorded.exit_code))
}
