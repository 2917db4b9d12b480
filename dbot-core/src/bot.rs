//! Bot abstraction for sending replies and fetching attachments.
//!
//! [`Bot`] is transport-agnostic; `dbot_telegram::TelegramBotAdapter` implements it via teloxide,
//! and handler tests substitute a recording implementation.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Outbound operations a handler may perform. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    /// Sends `content` as a file attachment named `file_name`, with an optional caption.
    async fn send_document(
        &self,
        chat: &Chat,
        file_name: &str,
        content: Vec<u8>,
        caption: Option<&str>,
    ) -> Result<()>;

    /// Downloads an attachment (e.g. a voice note) by its transport file id.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}
