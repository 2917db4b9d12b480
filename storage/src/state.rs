//! Session lifecycle.
//!
//! ```text
//! (absent) --/new--> in_conversation --reply contains trigger--> ready_for_brief
//!     ^                     |                                         |
//!     +------/cancel--------+----------- brief generated -----> completed
//! ```
//!
//! "Idle" is the absence of a session record, not a variant. The store does not validate
//! transitions; callers drive them through the functions in this module.

use serde::{Deserialize, Serialize};

use crate::models::Session;

/// Minimum number of history entries (three user/assistant pairs) before a brief may be generated.
pub const MIN_MESSAGES_FOR_BRIEF: u64 = 6;

/// Lifecycle state of a present session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Accepting messages; brief not yet offered.
    InConversation,
    /// The backend signalled it has enough to write the brief.
    ReadyForBrief,
    /// A brief was produced. Further messages are still accepted.
    Completed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::InConversation => "in_conversation",
            SessionState::ReadyForBrief => "ready_for_brief",
            SessionState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a session may produce a brief right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotEnoughMessages { have: u64, need: u64 },
}

/// Gate for brief generation: `message_count >= MIN_MESSAGES_FOR_BRIEF`, regardless of state.
pub fn brief_readiness(session: &Session) -> Readiness {
    let have = session.message_count();
    if have >= MIN_MESSAGES_FOR_BRIEF {
        Readiness::Ready
    } else {
        Readiness::NotEnoughMessages {
            have,
            need: MIN_MESSAGES_FOR_BRIEF,
        }
    }
}

/// Case-insensitive substring match of the trigger token in a completion reply.
///
/// An empty token never matches.
pub fn contains_trigger(reply: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    reply.to_lowercase().contains(&token.to_lowercase())
}

/// State after an assistant reply: `ready_for_brief` when the reply carries the trigger, otherwise unchanged.
pub fn state_after_reply(current: SessionState, reply: &str, token: &str) -> SessionState {
    if contains_trigger(reply, token) {
        SessionState::ReadyForBrief
    } else {
        current
    }
}
