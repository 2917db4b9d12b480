//! Session record model for persistence.
//!
//! One [`Session`] per user; serialized as a value of the `{"<user_id>": Session}` map in the sessions file.

use chrono::{DateTime, Utc};
use prompt::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};

use crate::state::SessionState;

/// Bookkeeping that travels with a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Set once when the session is created; `null` in files written before timestamps were recorded.
    pub created_at: Option<DateTime<Utc>>,
    /// Number of entries ever appended to `messages`.
    pub message_count: u64,
}

/// Per-user conversation state: ordered history, lifecycle state, metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub messages: Vec<ChatMessage>,
    pub state: SessionState,
    pub metadata: SessionMetadata,
}

impl Session {
    /// Fresh session: `in_conversation`, empty history, zero count, created now.
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            messages: Vec::new(),
            state: SessionState::InConversation,
            metadata: SessionMetadata {
                created_at: Some(Utc::now()),
                message_count: 0,
            },
        }
    }

    /// Appends an entry and bumps `message_count`.
    pub(crate) fn push(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
        self.metadata.message_count += 1;
    }

    pub fn message_count(&self) -> u64 {
        self.metadata.message_count
    }
}
