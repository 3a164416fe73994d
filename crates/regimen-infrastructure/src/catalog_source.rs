//! Catalog loading from a `products.json` file.

use std::path::PathBuf;

use async_trait::async_trait;
use regimen_core::catalog::{CatalogFile, CatalogSource, Product};
use regimen_core::error::{RegimenError, Result};

/// Reads `{ "products": [...] }` from disk.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Vec<Product>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RegimenError::catalog_load(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let file: CatalogFile = serde_json::from_str(&content).map_err(|e| {
            RegimenError::catalog_load(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        tracing::info!(
            path = %self.path.display(),
            count = file.products.len(),
            "Loaded product catalog"
        );
        Ok(file.products)
    }
}
