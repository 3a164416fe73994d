//! Selection domain module.
//!
//! - `model`: ordered, duplicate-free `SelectionSet`
//! - `store`: `SelectionStore` persistence trait and an in-memory implementation

mod model;
mod store;

pub use model::{SelectionChange, SelectionSet};
pub use store::{MemorySelectionStore, SelectionStore};
