//! # Configuration
//!
//! Stored as `config.json` in the platform config directory (via `directories`).
//!
//! The catalog location is resolved in priority order:
//! 1. `--source` on the command line
//! 2. `CATALOG_URL` in the environment
//! 3. `endpoint` in the config file
//! 4. [`DEFAULT_ENDPOINT`]
//!
//! `CATVIEW_CONFIG_DIR` replaces the platform directory when set.

use crate::error::{CatalogError, Result};
use crate::source::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "CATALOG_URL";

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "CATVIEW_CONFIG_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatviewConfig {
    /// Catalog endpoint URL or path to a static catalog document.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for CatviewConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl CatviewConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CatviewConfig = serde_json::from_str(&content).map_err(|e| {
            CatalogError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<()> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(CatalogError::Config("endpoint cannot be empty".into()));
        }
        self.endpoint = endpoint.to_string();
        Ok(())
    }

    /// Picks the catalog location: explicit flag, then `env_value`, then the file.
    pub fn resolve_location(&self, flag: Option<&str>, env_value: Option<&str>) -> String {
        [flag, env_value]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|v| !v.is_empty())
            .unwrap_or(self.endpoint.as_str())
            .to_string()
    }
}
