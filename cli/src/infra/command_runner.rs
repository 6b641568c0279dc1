//! Infrastructure implementation of the `ScriptRunner` port.
//!
//! `TokioScriptRunner` runs the provisioning script with tokio, sending its
//! stdout and stderr straight to the cluster-provision log, and kills it when
//! the timeout fires.

use std::fs::OpenOptions;
use std::process::Stdio;

use anyhow::{Context, Result};

use crate::application::ports::{ScriptExit, ScriptInvocation, ScriptRunner};

/// Interpreter the provisioning script is run with.
pub const SCRIPT_SHELL: &str = "/bin/bash";

/// Production `ScriptRunner`.
///
/// `tokio::time::timeout` around `.wait()` only drops the future; the child
/// would keep running. This implementation uses `tokio::select!` and, on
/// timeout, kills the script's whole process group so nothing it started
/// keeps writing to the log after the outcome is recorded.
#[derive(Debug, Clone)]
pub struct TokioScriptRunner {
    shell: String,
}

impl TokioScriptRunner {
    #[must_use]
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for TokioScriptRunner {
    fn default() -> Self {
        Self::new(SCRIPT_SHELL)
    }
}

impl ScriptRunner for TokioScriptRunner {
    async fn run_script(&self, invocation: &ScriptInvocation<'_>) -> Result<ScriptExit> {
        let log_path = invocation.log_path;
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("opening {}", log_path.display()))?;
        let stderr = stdout
            .try_clone()
            .with_context(|| format!("duplicating handle for {}", log_path.display()))?;

        let mut command = tokio::process::Command::new(&self.shell);
        #[cfg(unix)]
        command.process_group(0);
        let mut child = command
            .arg(invocation.script)
            .envs(invocation.environment)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                format!(
                    "failed to spawn {} {}",
                    self.shell,
                    invocation.script.display()
                )
            })?;
        let pid = child.id();

        tokio::select! {
            status = child.wait() => {
                let status = status
                    .with_context(|| format!("waiting for {}", invocation.script.display()))?;
                Ok(ScriptExit::Exited(status.code()))
            }
            () = tokio::time::sleep(invocation.timeout) => {
                terminate(&mut child, pid).await;
                tracing::warn!(
                    script = %invocation.script.display(),
                    timeout_secs = invocation.timeout.as_secs(),
                    "provisioning script killed after timeout",
                );
                Ok(ScriptExit::TimedOut)
            }
        }
    }
}

/// Kill the script's process group, then the script itself.
async fn terminate(child: &mut tokio::process::Child, pid: Option<u32>) {
    #[cfg(unix)]
    if let Some(pgid) = pid {
        let group = format!("-{pgid}");
        match tokio::process::Command::new("kill")
            .args(["-KILL", "--", &group])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!(pgid, %status, "kill of script process group failed"),
            Err(e) => tracing::warn!(pgid, error = %e, "cannot run kill for script process group"),
        }
    }
    #[cfg(not(unix))]
    let _ = pid;

    if let Err(e) = child.kill().await {
        tracing::warn!(error = %e, "failed to kill provisioning script");
    }
}
