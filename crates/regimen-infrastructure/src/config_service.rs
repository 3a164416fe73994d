//! Configuration service.
//!
//! Loads `config.toml` from the regimen config directory and applies
//! environment overrides on top.

use std::path::Path;

use regimen_core::config::AppConfig;
use regimen_core::error::{RegimenError, Result};

use crate::paths::RegimenPaths;

pub const ENDPOINT_URL_ENV: &str = "REGIMEN_ENDPOINT_URL";
pub const CATALOG_PATH_ENV: &str = "REGIMEN_CATALOG_PATH";

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: RegimenPaths,
}

impl ConfigService {
    pub fn new(paths: RegimenPaths) -> Self {
        Self { paths }
    }

    /// Loads, overrides from the environment, and validates.
    ///
    /// A missing config file is not an error; defaults are used.
    pub fn load(&self) -> Result<AppConfig> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| RegimenError::config(e.to_string()))?;
        let mut config = Self::load_file(&path)?;
        Self::apply_overrides(&mut config, |key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENDPOINT_URL_ENV).filter(|value| !value.trim().is_empty()) {
            config.endpoint_url = url;
        }
        if let Some(path) = lookup(CATALOG_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            config.catalog_path = path.into();
        }
    }
}
