//! Unit test module
//!
//! Handler unit tests live here, separate from source files.

mod logging_handler_test;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, Message, Result, User};

/// Recording Bot: keeps every text sent; no network.
#[derive(Default)]
pub(crate) struct MockBot {
    pub(crate) texts: Mutex<Vec<String>>,
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn send_document(
        &self,
        _chat: &Chat,
        _file_name: &str,
        _content: Vec<u8>,
        _caption: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }

    async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

pub(crate) fn sample_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "msg-1".to_string(),
        user: User {
            id: user_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 123,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        voice: None,
        created_at: Utc::now(),
    }
}
