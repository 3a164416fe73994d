//! Remote text generation contract.

mod client;
mod error;

pub use client::GenerationClient;
pub use error::GenerationError;
