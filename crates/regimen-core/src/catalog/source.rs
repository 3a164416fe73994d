//! Catalog source trait.

use async_trait::async_trait;

use super::model::Product;
use crate::error::Result;

/// Loads the product collection. Called once at startup.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Product>>;
}
