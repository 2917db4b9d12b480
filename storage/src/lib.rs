//! Storage crate: per-user conversation sessions and their lifecycle.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – Session, SessionMetadata
//! - [`state`] – SessionState and the transition / gating rules
//! - [`session_store`] – ConversationStore (JSON file)

mod error;
mod models;
mod session_store;
pub mod state;

pub use error::StoreError;
pub use models::{Session, SessionMetadata};
pub use session_store::{ConversationStore, LoadOutcome, SaveOutcome};
pub use state::{
    brief_readiness, contains_trigger, state_after_reply, Readiness, SessionState,
    MIN_MESSAGES_FOR_BRIEF,
};
