//! Ability configuration loader.

use std::path::Path;

use ability_core::AbilityConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for ability configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<AbilityConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<AbilityConfig> {
        let config: AbilityConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;

        Ok(config)
    }
}
