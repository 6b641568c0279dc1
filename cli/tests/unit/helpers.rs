//! Shared test doubles for the provisioning ports.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use aks_node_controller::application::ports::{
    ArtifactStore, ConfigSource, ScriptExit, ScriptInvocation, ScriptRunner,
};
use aks_node_controller::domain::{
    DEFAULT_TIMEOUT_SECS, FailureClass, ProvisionConfig, ProvisionOutcome, ProvisionPaths,
};
use aks_node_controller::infra::LocalFs;
use anyhow::Result;
use chrono::Utc;
use tempfile::TempDir;

// ── Node root ────────────────────────────────────────────────────────────────

/// A temp directory standing in for the node's `/`.
pub struct NodeRoot {
    pub dir: TempDir,
    pub paths: ProvisionPaths,
}

impl NodeRoot {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let paths = ProvisionPaths::under(dir.path());
        Self { dir, paths }
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("read artifact")
    }
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

pub fn outcome(class: FailureClass, detail: Option<&str>) -> ProvisionOutcome {
    let now = Utc::now();
    let mut outcome = match class {
        FailureClass::None => ProvisionOutcome::success(now, now),
        other => ProvisionOutcome::failure(other, "", now, now),
    };
    outcome.error_detail = detail.map(str::to_owned);
    outcome
}

// ── Artifact store doubles ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Durable(PathBuf, Vec<u8>),
    Marker(PathBuf),
}

impl StoreEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Durable(path, _) | Self::Marker(path) => path,
        }
    }
}

/// In-memory store that records every write in order.
#[derive(Default)]
pub struct RecordingStore {
    events: Mutex<Vec<StoreEvent>>,
    fail_on: Option<PathBuf>,
}

impl RecordingStore {
    pub fn failing_on(path: &Path) -> Self {
        Self {
            events: Mutex::default(),
            fail_on: Some(path.to_path_buf()),
        }
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().expect("lock").clone()
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.events().iter().map(|e| e.path().to_path_buf()).collect()
    }

    fn check(&self, path: &Path) -> Result<()> {
        if self.fail_on.as_deref() == Some(path) {
            anyhow::bail!("injected failure writing {}", path.display());
        }
        Ok(())
    }
}

impl ArtifactStore for RecordingStore {
    async fn write_durable(&self, path: &Path, contents: Vec<u8>) -> Result<()> {
        self.check(path)?;
        self.events
            .lock()
            .expect("lock")
            .push(StoreEvent::Durable(path.to_path_buf(), contents));
        Ok(())
    }

    async fn create_marker(&self, path: &Path) -> Result<()> {
        self.check(path)?;
        self.events
            .lock()
            .expect("lock")
            .push(StoreEvent::Marker(path.to_path_buf()));
        Ok(())
    }
}

/// Real filesystem store that stalls before writing one chosen path.
pub struct DelayedStore {
    pub delayed: PathBuf,
    pub delay: Duration,
}

impl ArtifactStore for DelayedStore {
    async fn write_durable(&self, path: &Path, contents: Vec<u8>) -> Result<()> {
        if path == self.delayed {
            tokio::time::sleep(self.delay).await;
        }
        LocalFs.write_durable(path, contents).await
    }

    async fn create_marker(&self, path: &Path) -> Result<()> {
        if path == self.delayed {
            tokio::time::sleep(self.delay).await;
        }
        LocalFs.create_marker(path).await
    }
}

// ── Config doubles ───────────────────────────────────────────────────────────

pub fn config() -> ProvisionConfig {
    ProvisionConfig {
        version: "v1".to_owned(),
        script_path: PathBuf::from("/opt/azure/containers/provision_start.sh"),
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        environment: BTreeMap::new(),
    }
}

pub enum FakeConfig {
    Valid(ProvisionConfig),
    Invalid(&'static str),
}

impl ConfigSource for FakeConfig {
    fn load(&self, _: &Path) -> Result<ProvisionConfig> {
        match self {
            Self::Valid(config) => Ok(config.clone()),
            Self::Invalid(reason) => anyhow::bail!("{reason}"),
        }
    }
}

// ── Script runner doubles ────────────────────────────────────────────────────

/// Appends canned output to the log and returns a canned exit.
pub struct FakeRunner {
    pub exit: ScriptExit,
    pub output: &'static str,
}

impl ScriptRunner for FakeRunner {
    async fn run_script(&self, invocation: &ScriptInvocation<'_>) -> Result<ScriptExit> {
        use std::io::Write;

        if let Some(parent) = invocation.log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut log = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(invocation.log_path)?;
        log.write_all(self.output.as_bytes())?;
        Ok(self.exit)
    }
}

/// Fails as if the script could not be spawned.
pub struct SpawnFailure;

impl ScriptRunner for SpawnFailure {
    async fn run_script(&self, invocation: &ScriptInvocation<'_>) -> Result<ScriptExit> {
        anyhow::bail!("failed to spawn /bin/bash {}", invocation.script.display())
    }
}

/// Panics if called; for paths that must never reach the script.
pub struct NeverRun;

impl ScriptRunner for NeverRun {
    async fn run_script(&self, _: &ScriptInvocation<'_>) -> Result<ScriptExit> {
        panic!("script must not run in this test")
    }
}
