//! Unified path management for regimen files.
//!
//! ```text
//! ~/.config/regimen/             # Config directory (or the override root)
//! ├── config.toml                # Application configuration
//! ├── selected_products.json     # Persisted selection set
//! └── logs/                      # Application logs
//!     └── regimen.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "regimen";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file location the application touches.
#[derive(Debug, Clone, Default)]
pub struct RegimenPaths {
    root: Option<PathBuf>,
}

impl RegimenPaths {
    /// `root` overrides the platform config directory (tests, `--config-dir`).
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Returns the regimen configuration directory.
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/regimen/` on Linux
    /// - `Err(PathError::ConfigDirNotFound)`: no override and no platform directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn selection_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("selected_products.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
