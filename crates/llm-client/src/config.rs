//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

use crate::openai_llm::{DEFAULT_MODEL, DEFAULT_TRANSCRIPTION_MODEL};

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn proxy_url(&self) -> Option<&str>;
    fn system_prompt(&self) -> Option<&str>;
    fn transcription_model(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub proxy_url: Option<String>,
    pub llm_system_prompt: Option<String>,
    pub transcription_model: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
    fn transcription_model(&self) -> &str {
        &self.transcription_model
    }
}

/// Reads a variable, treating unset and blank the same.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl EnvLlmConfig {
    /// Load from environment variables. `OPENAI_API_KEY` is required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = non_empty_var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = non_empty_var("OPENAI_BASE_URL")
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        let llm_model = non_empty_var("OPENAI_MODEL")
            .or_else(|| non_empty_var("MODEL"))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let proxy_url = non_empty_var("PROXILINE_URL");
        if let Some(proxy) = &proxy_url {
            anyhow::ensure!(proxy.is_ascii(), "PROXILINE_URL must be ASCII");
        }
        anyhow::ensure!(openai_api_key.is_ascii(), "OPENAI_API_KEY must be ASCII");
        let llm_system_prompt =
            non_empty_var("LLM_SYSTEM_PROMPT").or_else(|| non_empty_var("SYSTEM_PROMPT"));
        let transcription_model = non_empty_var("TRANSCRIPTION_MODEL")
            .unwrap_or_else(|| DEFAULT_TRANSCRIPTION_MODEL.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            proxy_url,
            llm_system_prompt,
            transcription_model,
        })
    }
}
