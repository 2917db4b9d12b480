//! # Simple handlers for dbot
//!
//! Stateless handlers: the time bot, the chat bot, and message logging.

mod chat_handler;
mod logging;
mod time_handler;

#[cfg(test)]
mod test;

pub use chat_handler::{ChatHandler, CHAT_WELCOME};
pub use prompt::MSG_REQUEST_FAILED;
pub use logging::LoggingHandler;
pub use time_handler::{format_server_time, TimeHandler, TIME_WELCOME};
