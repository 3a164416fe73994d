//! Chat transcript projection.

use serde::Serialize;

use crate::session::{MessageRole, Transcript};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLine {
    pub role: MessageRole,
    pub content: String,
    pub transient: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    pub lines: Vec<ChatLine>,
    /// Index of the newest line; the view auto-scrolls there after every render.
    pub scroll_to: Option<usize>,
}

pub fn project_chat(transcript: &Transcript) -> ChatView {
    let lines: Vec<ChatLine> = transcript
        .entries()
        .iter()
        .map(|entry| ChatLine {
            role: entry.role,
            content: entry.content.clone(),
            transient: entry.transient,
        })
        .collect();
    let scroll_to = lines.len().checked_sub(1);
    ChatView { lines, scroll_to }
}
