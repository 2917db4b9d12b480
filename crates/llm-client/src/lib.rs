//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] (chat completion) and [`Transcriber`] (speech to text) traits and
//! their OpenAI implementation. Transport-agnostic; used by the bot handlers, which are tested
//! against in-memory implementations of these traits.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai_llm::OpenAILlmClient;

/// One completion request: the full ordered message list plus output knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Request with the conversational defaults (`max_tokens = 1000`, `temperature = 0.7`).
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Chat completion backend. Errors are opaque to callers.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given request.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Speech-to-text backend.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Returns the recognized text of `audio`. `file_name` carries the container extension; `language` is a hint (e.g. `ru`).
    async fn transcribe(&self, file_name: &str, audio: Vec<u8>, language: &str) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
