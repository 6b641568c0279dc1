//! Application service: runs one provisioning attempt and classifies it.
//!
//! Every failure up to and including the script run becomes a
//! [`ProvisionOutcome`], so the recorder always gets something to record.
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use crate::application::ports::{
    ArtifactReader, ConfigSource, ScriptExit, ScriptInvocation, ScriptRunner,
};
use crate::domain::boot::parse_boot_time;
use crate::domain::result::{OUTPUT_TAIL_BYTES, tail};
use crate::domain::{EXIT_OUTBOUND_CONNECTIVITY, FailureClass, ProvisionOutcome, ProvisionPaths};

const PROC_STAT: &str = "/proc/stat";

/// Bytes of script output used as the outbound connectivity detail.
const CONNECTIVITY_DETAIL_BYTES: usize = 1024;

/// Run the provisioning script described by `config_path` and classify the result.
pub async fn run_attempt(
    paths: &ProvisionPaths,
    config_path: &Path,
    config: &impl ConfigSource,
    runner: &impl ScriptRunner,
    reader: &impl ArtifactReader,
) -> ProvisionOutcome {
    let started_at = Utc::now();
    let kernel_started_at = match reader.read_to_string(Path::new(PROC_STAT)).await {
        Ok(stat) => parse_boot_time(&stat),
        Err(_) => None,
    };

    let config = match config.load(config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                config = %config_path.display(),
                error = %format!("{e:#}"),
                "invalid provision config",
            );
            let mut outcome = ProvisionOutcome::failure(
                FailureClass::Other,
                format!("{e:#}"),
                started_at,
                Utc::now(),
            );
            outcome.kernel_started_at = kernel_started_at;
            return outcome;
        }
    };

    tracing::info!(
        script = %config.script_path.display(),
        timeout_secs = config.timeout_secs,
        env_vars = config.environment.len(),
        "starting provisioning script",
    );

    // The log is shared across attempts; only bytes past this offset belong to this run.
    let log_offset = reader.size(paths.cluster_provision_log()).await;

    let invocation = ScriptInvocation {
        script: &config.script_path,
        environment: &config.environment,
        timeout: Duration::from_secs(config.timeout_secs),
        log_path: paths.cluster_provision_log(),
    };
    let exit = runner.run_script(&invocation).await;
    let finished_at = Utc::now();

    let output = match reader
        .read_from(paths.cluster_provision_log(), log_offset)
        .await
    {
        Ok(text) => tail(&text, OUTPUT_TAIL_BYTES).to_owned(),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "cannot read cluster-provision log");
            String::new()
        }
    };

    let (script_exit_code, error_detail) = match exit {
        Ok(ScriptExit::Exited(Some(0))) => (Some(0), None),
        Ok(ScriptExit::Exited(Some(code @ EXIT_OUTBOUND_CONNECTIVITY))) => {
            let detail = tail(&output, CONNECTIVITY_DETAIL_BYTES).trim().to_owned();
            (Some(code), Some(detail))
        }
        Ok(ScriptExit::Exited(Some(code))) => (
            Some(code),
            Some(format!("provisioning script exited with code {code}")),
        ),
        Ok(ScriptExit::Exited(None)) => (
            None,
            Some("provisioning script was terminated by a signal".to_owned()),
        ),
        Ok(ScriptExit::TimedOut) => (
            None,
            Some(format!(
                "provisioning script timed out after {}s",
                config.timeout_secs
            )),
        ),
        Err(e) => (None, Some(format!("{e:#}"))),
    };

    let failure_class = FailureClass::from_script_exit(script_exit_code);
    match failure_class {
        FailureClass::None => tracing::info!("provisioning script succeeded"),
        FailureClass::OutboundConnectivity => {
            tracing::error!(exit_code = ?script_exit_code, "outbound connectivity check failed");
        }
        FailureClass::Other => tracing::error!(
            exit_code = ?script_exit_code,
            error = error_detail.as_deref().unwrap_or_default(),
            "provisioning failed",
        ),
    }

    ProvisionOutcome {
        failure_class,
        error_detail,
        script_exit_code,
        output,
        started_at,
        finished_at,
        kernel_started_at,
    }
}
