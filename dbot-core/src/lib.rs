//! # dbot-core
//!
//! Core types and traits for the Telegram bots: [`Bot`], [`Handler`], message and user types,
//! and tracing initialization. Transport-agnostic; used by dbot-telegram, handler-chain and the handler crates.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, Result};
pub use logger::init_tracing;
pub use types::{
    command_name, Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User,
    VoiceNote,
};
