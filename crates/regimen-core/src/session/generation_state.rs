//! Routine generation UI state.

use serde::{Deserialize, Serialize};

pub const GENERATE_LABEL: &str = "Generate Routine";
pub const GENERATING_LABEL: &str = "Generating…";

/// Drives the generate control: enabled state, label and busy indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GenerationState {
    #[default]
    Idle,
    /// A routine request is in flight; further generate triggers are rejected.
    GeneratingRoutine,
}

impl GenerationState {
    pub fn is_generating(self) -> bool {
        matches!(self, Self::GeneratingRoutine)
    }

    pub fn generate_enabled(self) -> bool {
        !self.is_generating()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => GENERATE_LABEL,
            Self::GeneratingRoutine => GENERATING_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state() {
        let state = GenerationState::default();
        assert!(state.generate_enabled());
        assert_eq!(state.label(), "Generate Routine");
    }

    #[test]
    fn test_generating_state() {
        let state = GenerationState::GeneratingRoutine;
        assert!(!state.generate_enabled());
        assert!(state.is_generating());
        assert_eq!(state.label(), "Generating…");
    }
}
