//! Infrastructure implementation of the `ConfigSource` port.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::ConfigSource;
use crate::domain::ProvisionConfig;

/// Reads the provision config from a YAML file. JSON configs parse too,
/// since JSON is valid YAML.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlConfigSource;

impl ConfigSource for YamlConfigSource {
    fn load(&self, path: &Path) -> Result<ProvisionConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: ProvisionConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid provision config {}", path.display()))?;
        Ok(config)
    }
}
