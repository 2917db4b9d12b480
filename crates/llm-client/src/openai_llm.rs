//! OpenAI implementation of [`LlmClient`] and [`Transcriber`], wrapping openai-client.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::CompletionOptions;
use tracing::instrument;

use super::{chat_message_to_openai, CompletionRequest, LlmClient, LlmConfig, Transcriber};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// Default speech-to-text model.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

/// LlmClient / Transcriber backed by [`openai_client::OpenAIClient`].
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    transcription_model: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self::from_client(openai_client::OpenAIClient::new(api_key))
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::from_client(openai_client::OpenAIClient::with_base_url(api_key, base_url))
    }

    /// Builds the client described by `config`, routing through the configured proxy when present.
    pub fn from_config(config: &dyn LlmConfig) -> Result<Self> {
        let client = match config.proxy_url() {
            Some(proxy) => openai_client::OpenAIClient::with_proxy(
                config.api_key().to_string(),
                config.base_url().to_string(),
                proxy,
            )?,
            None => openai_client::OpenAIClient::with_base_url(
                config.api_key().to_string(),
                config.base_url().to_string(),
            ),
        };
        Ok(Self::from_client(client)
            .with_model(config.model().to_string())
            .with_transcription_model(config.transcription_model().to_string()))
    }

    fn from_client(client: openai_client::OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_transcription_model(mut self, model: String) -> Self {
        self.transcription_model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, request), fields(message_count = request.messages.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let openai_messages = request
            .messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        self.client
            .chat_completion(
                &self.model,
                openai_messages,
                CompletionOptions {
                    max_tokens: request.max_tokens,
                    temperature: request.temperature,
                },
            )
            .await
    }
}

#[async_trait]
impl Transcriber for OpenAILlmClient {
    #[instrument(skip(self, audio))]
    async fn transcribe(&self, file_name: &str, audio: Vec<u8>, language: &str) -> Result<String> {
        self.client
            .transcribe(&self.transcription_model, file_name, audio, language)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnvLlmConfig;

    #[test]
    fn test_defaults_and_overrides() {
        let client = OpenAILlmClient::new("sk-test-key-1234567".to_string());
        assert_eq!(client.model(), DEFAULT_MODEL);

        let client = OpenAILlmClient::with_base_url(
            "sk-test-key-1234567".to_string(),
            "http://localhost:8080/v1".to_string(),
        )
        .with_model("gpt-4o".to_string());
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn test_from_config_uses_model_and_proxy() {
        let config = EnvLlmConfig {
            openai_api_key: "sk-test-key-1234567".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            llm_model: "gpt-4o-mini".to_string(),
            proxy_url: Some("http://127.0.0.1:3128".to_string()),
            llm_system_prompt: None,
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        };

        let client = OpenAILlmClient::from_config(&config).unwrap();

        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.transcription_model, "whisper-1");
    }
}
