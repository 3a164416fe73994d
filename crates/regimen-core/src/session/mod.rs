//! Conversation session module.
//!
//! # Module Structure
//!
//! - `message`: wire-level chat messages (`MessageRole`, `ChatMessage`)
//! - `transcript`: the displayed conversation with transient placeholder turns
//! - `generation_state`: the `{Idle, GeneratingRoutine}` state driving the generate control

mod generation_state;
mod message;
mod transcript;

pub use generation_state::GenerationState;
pub use message::{ChatMessage, MessageRole};
pub use transcript::{EntryId, Transcript, TranscriptEntry};
