//! Catalog domain module.
//!
//! # Module Structure
//!
//! - `model`: `Product`, the loaded `Catalog` and its load status
//! - `filter`: category + free-text filtering
//! - `source`: `CatalogSource` trait for loading the catalog

mod filter;
mod model;
mod source;

pub use filter::{filter, matches_category, matches_query};
pub use model::{Catalog, CatalogFile, CatalogStatus, Product, ProductId};
pub use source::CatalogSource;
