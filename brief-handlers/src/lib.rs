//! # brief-handlers
//!
//! The brief bot: a guided conversation per user that ends in a generated Markdown brief.
//!
//! - [`ConversationAssembler`]: one exchange with the completion backend, history policy, trigger detection.
//! - [`BriefGenerator`]: brief document from the full history.
//! - [`BriefHandler`]: [`dbot_core::Handler`] wiring commands, text and voice to the above.

mod assembler;
mod brief_handler;
mod command;
mod config;
mod generator;

pub use assembler::{
    ConversationAssembler, ExchangeError, ExchangeOutcome, FullHistory, HistoryPolicy,
    RecentWindow, CONVERSATION_MAX_TOKENS, CONVERSATION_TEMPERATURE,
};
pub use brief_handler::{
    document_file_name, BriefHandler, MSG_BRIEF_CAPTION, MSG_CANCELLED, MSG_EMPTY_TRANSCRIPTION,
    MSG_GENERATING, MSG_HELP, MSG_NEW_SESSION, MSG_NO_SESSION, MSG_REQUEST_FAILED,
    MSG_UNKNOWN_COMMAND, MSG_WELCOME,
};
pub use command::{parse_input, BriefCommand, Input};
pub use config::{BriefConfig, DEFAULT_SESSIONS_FILE, DEFAULT_TRIGGER_TOKEN};
pub use generator::{BriefGenerator, BRIEF_MAX_TOKENS, BRIEF_TEMPERATURE};
