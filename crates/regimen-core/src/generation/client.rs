//! Generation client trait.

use async_trait::async_trait;

use super::error::GenerationError;
use crate::session::ChatMessage;

/// A single request/response exchange with the text-generation endpoint.
///
/// One attempt per call, no retry. Implementations enforce their own timeout
/// and report failures only through [`GenerationError`]; transport details
/// never reach the caller.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn send(&self, messages: &[ChatMessage]) -> Result<String, GenerationError>;
}
