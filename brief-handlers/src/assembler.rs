//! One conversational exchange: append the user's text, ask the completion backend with the
//! system instruction plus history, append the reply, apply the trigger transition, persist.

use std::sync::Arc;

use llm_client::{CompletionRequest, LlmClient};
use prompt::{ChatMessage, MessageRole};
use storage::{state_after_reply, ConversationStore, SessionState};
use thiserror::Error;
use tracing::{error, info, instrument};

/// Reply knobs for conversational turns.
pub const CONVERSATION_MAX_TOKENS: u32 = 1000;
pub const CONVERSATION_TEMPERATURE: f32 = 0.7;

/// Chooses which part of the stored history is sent with each request.
pub trait HistoryPolicy: Send + Sync {
    fn select<'a>(&self, history: &'a [ChatMessage]) -> &'a [ChatMessage];
}

/// Sends the entire history every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullHistory;

impl HistoryPolicy for FullHistory {
    fn select<'a>(&self, history: &'a [ChatMessage]) -> &'a [ChatMessage] {
        history
    }
}

/// Sends only the last `n` entries. The stored history is not truncated.
#[derive(Debug, Clone, Copy)]
pub struct RecentWindow(pub usize);

impl HistoryPolicy for RecentWindow {
    fn select<'a>(&self, history: &'a [ChatMessage]) -> &'a [ChatMessage] {
        let start = history.len().saturating_sub(self.0);
        &history[start..]
    }
}

/// Successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    pub reply: String,
    /// Session state after the reply was applied.
    pub state: SessionState,
}

impl ExchangeOutcome {
    pub fn ready_for_brief(&self) -> bool {
        self.state == SessionState::ReadyForBrief
    }
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("No active session for user {0}")]
    NoSession(i64),

    #[error("Completion backend failed: {0}")]
    Backend(#[source] anyhow::Error),
}

/// Drives conversational turns against a shared [`ConversationStore`].
pub struct ConversationAssembler {
    store: Arc<ConversationStore>,
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    trigger_token: String,
    policy: Box<dyn HistoryPolicy>,
}

impl ConversationAssembler {
    /// Assembler with [`FullHistory`].
    pub fn new(
        store: Arc<ConversationStore>,
        llm: Arc<dyn LlmClient>,
        system_prompt: impl Into<String>,
        trigger_token: impl Into<String>,
    ) -> Self {
        Self {
            store,
            llm,
            system_prompt: system_prompt.into(),
            trigger_token: trigger_token.into(),
            policy: Box::new(FullHistory),
        }
    }

    pub fn with_history_policy(mut self, policy: Box<dyn HistoryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Request for the current history: system instruction first, then the selected history in order.
    fn build_request(&self, history: &[ChatMessage]) -> CompletionRequest {
        let selected = self.policy.select(history);
        let mut messages = Vec::with_capacity(selected.len() + 1);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend_from_slice(selected);
        CompletionRequest::new(messages)
            .with_max_tokens(CONVERSATION_MAX_TOKENS)
            .with_temperature(CONVERSATION_TEMPERATURE)
    }

    /// Runs one turn for `user_id`.
    ///
    /// Without a session nothing is mutated. On backend failure the user entry stays in the
    /// history (and is persisted) with no assistant reply.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn exchange(
        &self,
        user_id: i64,
        text: &str,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        if !self.store.add_message(user_id, MessageRole::User, text).await {
            return Err(ExchangeError::NoSession(user_id));
        }

        let history = self.store.messages(user_id).await;
        let request = self.build_request(&history);

        let reply = match self.llm.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(user_id, error = %e, "Completion failed; user message kept");
                self.store.save().await;
                return Err(ExchangeError::Backend(e));
            }
        };

        self.store
            .add_message(user_id, MessageRole::Assistant, &reply)
            .await;
        // /cancel may have removed the session while the request was in flight.
        let current = self
            .store
            .state(user_id)
            .await
            .ok_or(ExchangeError::NoSession(user_id))?;
        let state = state_after_reply(current, &reply, &self.trigger_token);
        if state != current {
            self.store.set_state(user_id, state).await;
            info!(user_id, from = %current, to = %state, "Session state changed");
        }
        self.store.save().await;

        Ok(ExchangeOutcome { reply, state })
    }
}
