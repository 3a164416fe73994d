pub mod catalog_source;
pub mod config_service;
pub mod paths;
pub mod selection_store;
pub mod storage;

pub use crate::catalog_source::FileCatalogSource;
pub use crate::config_service::ConfigService;
pub use crate::paths::RegimenPaths;
pub use crate::selection_store::JsonSelectionStore;
