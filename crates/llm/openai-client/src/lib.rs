//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for chat completion and audio transcription.
//! Provides token masking for safe logging, optional HTTP(S) proxy, and a simple request/response API.

use async_openai::{
    types::{AudioInput, CreateChatCompletionRequestArgs, CreateTranscriptionRequestArgs},
    Client,
};
use std::sync::Arc;
use tracing;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
/// Exposed for tests and for callers who need to log API keys safely.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        let head = &token[..7];
        let tail = &token[len - 4..];
        format!("{}***{}", head, tail)
    }
}

/// Sampling knobs sent with every chat completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    /// Upper bound on generated tokens (`max_tokens`).
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// OpenAI client. Wraps async-openai client and keeps the API key for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    /// Shared async-openai client used for all API calls.
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    /// API key kept only for masked logging.
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client whose HTTP traffic goes through `proxy_url` (HTTP and HTTPS).
    pub fn with_proxy(api_key: String, base_url: String, proxy_url: &str) -> anyhow::Result<Self> {
        let proxy = reqwest::Proxy::all(proxy_url)?;
        let http_client = reqwest::Client::builder().proxy(proxy).build()?;
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        tracing::info!("OpenAI client configured with proxy");
        Ok(Self {
            client: Arc::new(Client::with_config(config).with_http_client(http_client)),
            api_key_for_logging,
        })
    }

    fn masked_key(&self) -> String {
        mask_token(&self.api_key_for_logging)
    }

    /// Sends a chat completion request and returns the trimmed assistant reply.
    ///
    /// Logs masked API key, request JSON, and token usage. Returns the first choice's content
    /// or an error if the response has no choices.
    #[allow(deprecated)]
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        options: CompletionOptions,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            max_tokens = options.max_tokens,
            temperature = options.temperature,
            api_key = %self.masked_key(),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .max_tokens(options.max_tokens)
            .temperature(options.temperature)
            .build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => {
                let text = choice
                    .message
                    .content
                    .as_deref()
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                tracing::info!(chars = text.chars().count(), "Got chat completion");
                Ok(text)
            }
            None => anyhow::bail!("No response from OpenAI"),
        }
    }

    /// Transcribes an audio file (e.g. a Telegram voice note) and returns the recognized text.
    ///
    /// `file_name` must carry an extension the API recognizes (`.ogg`, `.mp3`, ...).
    /// `language` is an ISO-639-1 hint such as `ru`.
    pub async fn transcribe(
        &self,
        model: &str,
        file_name: &str,
        audio: Vec<u8>,
        language: &str,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            file_name = %file_name,
            bytes = audio.len(),
            language = %language,
            api_key = %self.masked_key(),
            "OpenAI transcription request"
        );

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8(file_name.to_string(), audio))
            .model(model)
            .language(language)
            .build()?;

        let response = self.client.audio().transcribe(request).await?;
        tracing::info!(chars = response.text.chars().count(), "Transcribed audio");
        Ok(response.text)
    }
}
