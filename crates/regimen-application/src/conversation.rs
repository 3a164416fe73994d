//! Conversation controller: routine generation and free-form chat.
//!
//! Both entry points share the session transcript and the generation client.
//! Remote failures never escape; they are folded into the transcript as a
//! fixed apology and returned to the caller for logging or tests.

use std::sync::Arc;

use regimen_core::generation::{GenerationClient, GenerationError};
use regimen_core::session::EntryId;

use crate::session::{RoutineStart, SessionHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineOutcome {
    /// A routine request was already in flight; nothing changed.
    AlreadyInFlight,
    /// Nothing selected; a guidance turn was appended and no call was made.
    EmptySelection,
    /// The trimmed routine text.
    Generated(String),
    Failed(GenerationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Blank input; nothing was appended.
    Ignored,
    /// The trimmed reply.
    Replied(String),
    Failed(GenerationError),
}

/// Returns the session to `Idle` however the routine request ends,
/// including when the request future is dropped mid-flight.
struct GenerationGuard {
    session: SessionHandle,
    placeholder: EntryId,
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        self.session.with(|session| session.end_routine(self.placeholder));
    }
}

#[derive(Clone)]
pub struct ConversationController {
    session: SessionHandle,
    client: Arc<dyn GenerationClient>,
}

impl ConversationController {
    pub fn new(session: SessionHandle, client: Arc<dyn GenerationClient>) -> Self {
        Self { session, client }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub async fn generate_routine(&self) -> RoutineOutcome {
        let start = self.session.with(|session| session.begin_routine());
        let (messages, placeholder) = match start {
            RoutineStart::AlreadyInFlight => {
                tracing::debug!("Routine generation already in flight");
                return RoutineOutcome::AlreadyInFlight;
            }
            RoutineStart::EmptySelection => return RoutineOutcome::EmptySelection,
            RoutineStart::Ready {
                messages,
                placeholder,
            } => (messages, placeholder),
        };

        let _guard = GenerationGuard {
            session: self.session.clone(),
            placeholder,
        };

        tracing::info!(messages = messages.len(), "Requesting routine generation");
        let result = self.client.send(&messages).await;
        self.session
            .with(|session| session.finish_routine(placeholder, &result));

        match result {
            Ok(text) => RoutineOutcome::Generated(text.trim().to_string()),
            Err(err) => {
                tracing::warn!(kind = err.kind(), "Routine generation failed");
                RoutineOutcome::Failed(err)
            }
        }
    }

    pub async fn submit_chat(&self, text: &str) -> ChatOutcome {
        let text = text.trim();
        if text.is_empty() {
            return ChatOutcome::Ignored;
        }

        let context = self.session.with(|session| session.begin_chat(text));

        tracing::info!(context = context.len(), "Sending chat turn");
        let result = self.client.send(&context).await;
        self.session.with(|session| session.finish_chat(&result));

        match result {
            Ok(reply) => ChatOutcome::Replied(reply.trim().to_string()),
            Err(err) => {
                tracing::warn!(kind = err.kind(), "Chat request failed");
                ChatOutcome::Failed(err)
            }
        }
    }
}
