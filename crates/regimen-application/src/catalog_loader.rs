//! Startup catalog loading.

use regimen_core::catalog::{Catalog, CatalogSource};

/// Loads the catalog once. Any failure yields [`Catalog::failed`]; nothing retries.
pub async fn load_catalog(source: &dyn CatalogSource) -> Catalog {
    match source.load().await {
        Ok(products) => Catalog::new(products),
        Err(err) => {
            tracing::error!(error = %err, "Failed to load product catalog");
            Catalog::failed()
        }
    }
}
