//! Application context: the dependencies every command handler needs.

use crate::domain::ProvisionPaths;
use crate::infra::{LocalFs, TokioScriptRunner, YamlConfigSource};

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext`.
pub struct AppContext {
    /// Fixed artifact locations.
    pub paths: ProvisionPaths,
    pub fs: LocalFs,
    pub runner: TokioScriptRunner,
    pub config: YamlConfigSource,
}

impl AppContext {
    /// Production context with the system artifact paths.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: ProvisionPaths::system(),
            fs: LocalFs,
            runner: TokioScriptRunner::default(),
            config: YamlConfigSource,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
