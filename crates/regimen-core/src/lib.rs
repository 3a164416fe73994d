//! Domain layer for the Regimen product picker.
//!
//! Everything here is synchronous and free of I/O except for the
//! [`CatalogSource`](catalog::CatalogSource) and
//! [`GenerationClient`](generation::GenerationClient) traits, which the
//! infrastructure and interaction crates implement.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod projection;
pub mod selection;
pub mod session;
pub mod view;

// Re-export common error type
pub use error::RegimenError;
