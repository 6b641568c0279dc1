//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`
//! or `crate::commands`.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::domain::ProvisionConfig;

// ── Artifact Ports ────────────────────────────────────────────────────────────

/// Writes provisioning artifacts.
#[allow(async_fn_in_trait)]
pub trait ArtifactStore {
    /// Write `contents` so that `path` either keeps its old state or holds the
    /// complete new contents, flushed to disk before returning.
    async fn write_durable(&self, path: &Path, contents: Vec<u8>) -> Result<()>;
    /// Create an empty marker file at `path`, flushed to disk before returning.
    async fn create_marker(&self, path: &Path) -> Result<()>;
}

/// Reads provisioning artifacts. Used by watchers and for log tails.
#[allow(async_fn_in_trait)]
pub trait ArtifactReader {
    async fn exists(&self, path: &Path) -> bool;
    async fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Current size of `path` in bytes; 0 when it does not exist.
    async fn size(&self, path: &Path) -> u64;
    /// Contents of `path` from byte `offset` to the end, lossily decoded.
    /// Empty when the file is missing or shorter than `offset`.
    async fn read_from(&self, path: &Path, offset: u64) -> Result<String>;
}

// ── Script Runner Port ────────────────────────────────────────────────────────

/// Parameters for one run of the provisioning script.
pub struct ScriptInvocation<'a> {
    /// Script executed through `/bin/bash`.
    pub script: &'a Path,
    /// Extra environment variables for the script.
    pub environment: &'a BTreeMap<String, String>,
    /// The script is killed once this elapses.
    pub timeout: Duration,
    /// File that receives the script's stdout and stderr (appended).
    pub log_path: &'a Path,
}

/// How the provisioning script ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptExit {
    /// Exited on its own; `None` when terminated by a signal.
    Exited(Option<i32>),
    /// Killed after exceeding the timeout.
    TimedOut,
}

/// Abstracts process execution so the provisioning service can be tested
/// without spawning real scripts.
#[allow(async_fn_in_trait)]
pub trait ScriptRunner {
    /// Run the script to completion or timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or its log cannot be
    /// opened. On timeout the child must be killed, not left orphaned.
    async fn run_script(&self, invocation: &ScriptInvocation<'_>) -> Result<ScriptExit>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Loads and validates the provision config file.
pub trait ConfigSource {
    fn load(&self, path: &Path) -> Result<ProvisionConfig>;
}
