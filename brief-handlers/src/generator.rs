//! Brief document generation from a conversation history.

use std::sync::Arc;

use llm_client::{CompletionRequest, LlmClient};
use prompt::{format_history, render_brief_prompt, ChatMessage, BRIEF_GENERATION_SYSTEM_PROMPT};
use tracing::{info, instrument};

pub const BRIEF_MAX_TOKENS: u32 = 2000;
pub const BRIEF_TEMPERATURE: f32 = 0.7;

/// Turns a full history into a Markdown brief with a single completion request.
///
/// Gating and state changes are the caller's job.
#[derive(Clone)]
pub struct BriefGenerator {
    llm: Arc<dyn LlmClient>,
}

impl BriefGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// `[system: expert instruction, user: template with "ROLE: content" lines]`.
    pub fn build_request(history: &[ChatMessage]) -> CompletionRequest {
        let prompt = render_brief_prompt(&format_history(history));
        CompletionRequest::new(vec![
            ChatMessage::system(BRIEF_GENERATION_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_max_tokens(BRIEF_MAX_TOKENS)
        .with_temperature(BRIEF_TEMPERATURE)
    }

    /// Returns the backend's text verbatim.
    #[instrument(skip(self, history), fields(history_len = history.len()))]
    pub async fn generate(&self, history: &[ChatMessage]) -> anyhow::Result<String> {
        let document = self.llm.complete(Self::build_request(history)).await?;
        info!(chars = document.chars().count(), "Brief generated");
        Ok(document)
    }
}
