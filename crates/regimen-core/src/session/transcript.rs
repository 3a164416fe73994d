//! The displayed conversation transcript.
//!
//! Append-only, with one exception: transient placeholder entries are removed
//! by their [`EntryId`], which never disturbs any other entry.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::{ChatMessage, MessageRole};

/// Identifier of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A single turn in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub role: MessageRole,
    pub content: String,
    /// Provisional status turn shown while a request is in flight.
    pub transient: bool,
    /// Timestamp when the entry was created (RFC 3339).
    pub timestamp: String,
}

impl TranscriptEntry {
    fn new(role: MessageRole, content: String, transient: bool) -> Self {
        Self {
            id: EntryId::new(),
            role,
            content,
            transient,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::new(self.role, self.content.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> EntryId {
        self.push(TranscriptEntry::new(MessageRole::User, content.into(), false))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> EntryId {
        self.push(TranscriptEntry::new(
            MessageRole::Assistant,
            content.into(),
            false,
        ))
    }

    /// Appends a transient assistant placeholder.
    pub fn push_placeholder(&mut self, content: impl Into<String>) -> EntryId {
        self.push(TranscriptEntry::new(
            MessageRole::Assistant,
            content.into(),
            true,
        ))
    }

    /// Removes the transient entry with `id`. Non-transient entries are never removed.
    pub fn remove_transient(&mut self, id: EntryId) -> bool {
        match self
            .entries
            .iter()
            .position(|entry| entry.id == id && entry.transient)
        {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// The most recent `window` non-transient turns, oldest first, for upstream replay.
    pub fn recent_context(&self, window: usize) -> Vec<ChatMessage> {
        let turns: Vec<&TranscriptEntry> = self
            .entries
            .iter()
            .filter(|entry| !entry.transient)
            .collect();
        let start = turns.len().saturating_sub(window);
        turns[start..].iter().map(|entry| entry.to_message()).collect()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: TranscriptEntry) -> EntryId {
        let id = entry.id;
        self.entries.push(entry);
        id
    }
}
