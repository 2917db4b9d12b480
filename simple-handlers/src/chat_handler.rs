//! Chat bot: each text message is answered by the completion backend, without memory.
//!
//! **External interactions:** [`Bot`] (replies), [`LlmClient`] (one request per message).

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use llm_client::{CompletionRequest, LlmClient};
use prompt::{ChatMessage, MSG_REQUEST_FAILED};
use tracing::{error, instrument};

pub const CHAT_WELCOME: &str =
    "Привет! Я бот с искусственным интеллектом. Напиши мне любой вопрос, и я постараюсь ответить.";

pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl ChatHandler {
    pub fn new(bot: Arc<dyn Bot>, llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            bot,
            llm,
            system_prompt: system_prompt.into(),
        }
    }

    /// `[system, user(question)]` with the conversational defaults.
    pub fn build_request(&self, question: &str) -> CompletionRequest {
        CompletionRequest::new(vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(question),
        ])
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = match message.command() {
            Some(name) if name.eq_ignore_ascii_case("start") => CHAT_WELCOME.to_string(),
            Some(_) => return Ok(HandlerResponse::Ignore),
            None if message.content.trim().is_empty() => return Ok(HandlerResponse::Ignore),
            None => match self.llm.complete(self.build_request(message.content.trim())).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(error = %e, "Chat completion failed");
                    MSG_REQUEST_FAILED.to_string()
                }
            },
        };
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
