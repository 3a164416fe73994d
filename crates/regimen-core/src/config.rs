//! Application configuration model.
//!
//! The on-disk form is `config.toml` in the regimen config directory. Every
//! field has a default, so an empty or missing file yields a usable config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{RegimenError, Result};

/// Number of products revealed per "show more" step.
pub const DEFAULT_PAGE_SIZE: usize = 9;
/// Number of most recent transcript turns forwarded with each chat request.
pub const DEFAULT_CONTEXT_WINDOW: usize = 12;
/// Upper bound for a single remote generation call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8787/";
pub const DEFAULT_CATALOG_PATH: &str = "products.json";

/// Root configuration structure for config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Text-generation endpoint receiving `{ "messages": [...] }`.
    pub endpoint_url: String,
    /// Timeout applied to each remote call, in seconds.
    pub timeout_secs: u64,
    /// Sliding window of transcript turns sent with chat requests.
    pub context_window: usize,
    /// Pagination increment for the product grid.
    pub page_size: usize,
    /// Location of the product catalog JSON.
    pub catalog_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            context_window: DEFAULT_CONTEXT_WINDOW,
            page_size: DEFAULT_PAGE_SIZE,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects values that would break the pagination or request invariants.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(RegimenError::config("page_size must be at least 1"));
        }
        if self.context_window == 0 {
            return Err(RegimenError::config("context_window must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(RegimenError::config("timeout_secs must be at least 1"));
        }
        if self.endpoint_url.trim().is_empty() {
            return Err(RegimenError::config("endpoint_url must not be empty"));
        }
        Ok(())
    }
}
