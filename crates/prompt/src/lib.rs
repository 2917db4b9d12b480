//! # Prompt
//!
//! Chat message types shared by the session store and the LLM client, plus the fixed
//! prompts the bots send to the completion backend.
//!
//! ## Prompts
//!
//! - **Conversation**: system instruction for the brief interview; tells the model to emit the
//!   trigger token once enough is known (see [`conversation_system_prompt`]).
//! - **Brief generation**: system instruction and template that turn a formatted history into
//!   a Markdown product brief (see [`render_brief_prompt`]).
//! - **Chat**: default system instruction for the stateless chat bot.
//!
//! Also holds [`MSG_REQUEST_FAILED`], the user-facing apology every bot sends on failure.
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to OpenAI-compatible chat completion APIs.
//! - **Disk**: [`ChatMessage`] is serialized as `{"role": "...", "content": "..."}` in the sessions file.

use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// API / storage spelling: `system`, `user`, `assistant`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Uppercased label used when a history is rendered as plain text (`USER`, `ASSISTANT`).
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::System => "SYSTEM",
            MessageRole::User => "USER",
            MessageRole::Assistant => "ASSISTANT",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Apology sent to the user when a backend or upload step fails. Shared by every bot.
pub const MSG_REQUEST_FAILED: &str =
    "Извините, произошла ошибка при обработке запроса. Попробуйте ещё раз позже.";

/// Default system instruction for the stateless chat bot.
pub const DEFAULT_CHAT_SYSTEM_PROMPT: &str = "Ты — дружелюбный ассистент в Telegram. \
Отвечай кратко и по делу, без Markdown-разметки, обычным текстом.";

/// Placeholder replaced by the trigger token in [`CONVERSATION_SYSTEM_TEMPLATE`].
pub const TRIGGER_PLACEHOLDER: &str = "{trigger_token}";

/// System instruction for the brief interview. `{trigger_token}` is substituted at startup.
pub const CONVERSATION_SYSTEM_TEMPLATE: &str = "Ты — опытный продакт-менеджер. \
Твоя задача — в диалоге выяснить у пользователя всё, что нужно для продуктового брифа: \
цель продукта, целевую аудиторию, ключевые функции, ограничения, сроки и метрики успеха. \
Задавай по одному-два уточняющих вопроса за раз, коротко подводи итог услышанного. \
Когда информации достаточно для брифа, сообщи об этом пользователю и предложи отправить \
команду {trigger_token}.";

/// System instruction for the brief generation request.
pub const BRIEF_GENERATION_SYSTEM_PROMPT: &str =
    "Ты — эксперт по созданию продуктовых требований.";

/// Placeholder replaced by the formatted history in [`BRIEF_GENERATION_TEMPLATE`].
pub const HISTORY_PLACEHOLDER: &str = "{conversation_history}";

/// User prompt for the brief generation request.
pub const BRIEF_GENERATION_TEMPLATE: &str = "На основе диалога ниже составь продуктовый бриф \
в формате Markdown. Структура:\n\
\n\
# Название продукта\n\
## Цель\n\
## Целевая аудитория\n\
## Ключевые функции\n\
## Ограничения и допущения\n\
## Сроки\n\
## Метрики успеха\n\
## Открытые вопросы\n\
\n\
Если какой-то раздел в диалоге не обсуждался, так и укажи.\n\
\n\
Диалог:\n\
{conversation_history}";

/// Builds the conversation system instruction for the given trigger token.
pub fn conversation_system_prompt(trigger_token: &str) -> String {
    CONVERSATION_SYSTEM_TEMPLATE.replace(TRIGGER_PLACEHOLDER, trigger_token)
}

/// Renders a history as `"<ROLE>: <content>"` lines joined by `\n`, in order.
pub fn format_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes a formatted history into [`BRIEF_GENERATION_TEMPLATE`].
pub fn render_brief_prompt(formatted_history: &str) -> String {
    BRIEF_GENERATION_TEMPLATE.replace(HISTORY_PLACEHOLDER, formatted_history)
}
