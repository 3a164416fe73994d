//! Remote generation failures.

use std::time::Duration;

use thiserror::Error;

/// Why a generation call failed.
///
/// Kinds are kept apart for logging and tests; users only ever see a fixed
/// apology turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The call did not complete in time and was cancelled.
    #[error("Generation request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-success status.
    #[error("Generation endpoint returned status {status}")]
    Remote { status: u16 },

    /// A success response without generated text at any accepted location.
    #[error("Generation endpoint returned an unexpected response")]
    MalformedResponse,

    /// The request never got a response (connection refused, DNS, ...).
    #[error("Generation request failed: {0}")]
    Transport(String),
}

impl GenerationError {
    /// Short stable name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Remote { .. } => "remote_error",
            Self::MalformedResponse => "malformed_response",
            Self::Transport(_) => "transport",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(GenerationError::Timeout(Duration::from_secs(30)).kind(), "timeout");
        assert_eq!(GenerationError::Remote { status: 502 }.kind(), "remote_error");
        assert_eq!(GenerationError::MalformedResponse.kind(), "malformed_response");
    }

    #[test]
    fn test_remote_display_carries_status() {
        let err = GenerationError::Remote { status: 429 };
        assert_eq!(err.to_string(), "Generation endpoint returned status 429");
    }
}
