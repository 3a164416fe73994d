//! Product and catalog types.

use serde::{Deserialize, Serialize};

/// Stable product identifier as it appears in `products.json`.
pub type ProductId = i64;

/// A single selectable product. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// On-disk shape of the catalog source: `{ "products": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Whether the catalog made it into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogStatus {
    Loaded,
    /// Terminal for the session; the grid shows a placeholder and nothing retries.
    LoadFailed,
}

/// The full, immutable product collection for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    status: CatalogStatus,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            status: CatalogStatus::Loaded,
        }
    }

    /// An empty catalog marking a failed load.
    pub fn failed() -> Self {
        Self {
            products: Vec::new(),
            status: CatalogStatus::LoadFailed,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.status == CatalogStatus::Loaded
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Distinct categories in first-seen order, for the category selector.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        Self::new(file.products)
    }
}
