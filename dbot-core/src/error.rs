//! Error types for the bot core.

use thiserror::Error;

/// Top-level error for dbot handlers and transports.
#[derive(Error, Debug)]
pub enum DbotError {
    /// Transport failure while sending or downloading (e.g. Telegram API error).
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
