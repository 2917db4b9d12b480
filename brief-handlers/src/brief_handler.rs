//! Brief bot handler: commands, free text and voice notes for the guided brief conversation.
//!
//! **External interactions:** [`Bot`] (replies, document upload, voice download),
//! [`ConversationStore`] (session state, persisted after each mutation),
//! [`LlmClient`] (conversation and brief generation), [`Transcriber`] (voice notes).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use llm_client::{LlmClient, Transcriber};
use prompt::conversation_system_prompt;
pub use prompt::MSG_REQUEST_FAILED;
use storage::{brief_readiness, ConversationStore, Readiness, SessionState};
use tracing::{error, info, instrument, warn};

use crate::assembler::{ConversationAssembler, ExchangeError, RecentWindow};
use crate::command::{parse_input, BriefCommand, Input};
use crate::config::BriefConfig;
use crate::generator::BriefGenerator;

// --- User-facing texts ---
pub const MSG_WELCOME: &str = "Привет! Я помогу составить продуктовый бриф.\n\n\
Отправьте /new, чтобы начать новую задачу, и отвечайте на мои вопросы текстом или голосом. \
Когда информации будет достаточно, отправьте /generate, и я пришлю готовый документ.";
pub const MSG_HELP: &str = "Команды:\n\
/new — начать новую задачу\n\
/generate — сформировать бриф\n\
/cancel — отменить текущую задачу\n\
/help — эта справка";
pub const MSG_NEW_SESSION: &str =
    "Начинаем новую задачу! Расскажите, какой продукт вы хотите создать?";
pub const MSG_NO_SESSION: &str =
    "У вас нет активной задачи. Отправьте /new, чтобы начать.";
pub const MSG_CANCELLED: &str = "Задача отменена. Чтобы начать заново, отправьте /new.";
pub const MSG_GENERATING: &str = "⏳ Генерирую бриф, это может занять минуту...";
pub const MSG_BRIEF_CAPTION: &str =
    "📄 Ваш продуктовый бриф готов! Чтобы начать новую задачу, отправьте /new.";
pub const MSG_EMPTY_TRANSCRIPTION: &str =
    "Не удалось распознать голосовое сообщение. Попробуйте ещё раз или напишите текстом.";
pub const MSG_UNKNOWN_COMMAND: &str =
    "Неизвестная команда. Отправьте /help, чтобы увидеть список команд.";

fn not_ready_text(have: u64, need: u64) -> String {
    format!(
        "Пока недостаточно информации для брифа (сообщений: {} из {}). \
Расскажите ещё немного о продукте.",
        have, need
    )
}

fn transcribed_text(text: &str) -> String {
    format!("🎤 Распознано: {}", text)
}

/// `brief_<user_id>_<YYYYmmdd_HHMMSS>.md`.
pub fn document_file_name(user_id: i64, at: DateTime<Local>) -> String {
    format!("brief_{}_{}.md", user_id, at.format("%Y%m%d_%H%M%S"))
}

/// File name handed to the transcriber; the extension tells it the container format.
fn voice_file_name(mime_type: Option<&str>) -> &'static str {
    match mime_type {
        Some("audio/mpeg") => "voice.mp3",
        Some("audio/mp4") | Some("audio/m4a") => "voice.m4a",
        Some("audio/wav") | Some("audio/x-wav") => "voice.wav",
        _ => "voice.ogg",
    }
}

/// Logs error and its cause chain. First item with `first_msg`, rest with "Caused by".
fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
    for (i, cause) in e.chain().enumerate() {
        if i == 0 {
            error!(cause = %cause, "{}", first_msg);
        } else {
            error!(cause = %cause, "Caused by");
        }
    }
}

/// Runs the brief conversation for each private chat.
pub struct BriefHandler {
    bot: Arc<dyn Bot>,
    store: Arc<ConversationStore>,
    assembler: ConversationAssembler,
    generator: BriefGenerator,
    transcriber: Arc<dyn Transcriber>,
    transcription_language: String,
}

impl BriefHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        store: Arc<ConversationStore>,
        llm: Arc<dyn LlmClient>,
        transcriber: Arc<dyn Transcriber>,
        config: &BriefConfig,
    ) -> Self {
        let mut assembler = ConversationAssembler::new(
            store.clone(),
            llm.clone(),
            conversation_system_prompt(&config.trigger_token),
            config.trigger_token.clone(),
        );
        if let Some(n) = config.history_window {
            assembler = assembler.with_history_policy(Box::new(RecentWindow(n)));
        }
        Self {
            bot,
            store,
            assembler,
            generator: BriefGenerator::new(llm),
            transcriber,
            transcription_language: config.transcription_language.clone(),
        }
    }

    async fn reply(&self, message: &Message, text: impl Into<String>) -> Result<HandlerResponse> {
        let text = text.into();
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    // ---------- Commands ----------

    async fn handle_command(
        &self,
        message: &Message,
        command: BriefCommand,
    ) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        match command {
            BriefCommand::Start => self.reply(message, MSG_WELCOME).await,
            BriefCommand::Help => self.reply(message, MSG_HELP).await,
            BriefCommand::New => {
                self.store.create(user_id).await;
                self.store.save().await;
                self.reply(message, MSG_NEW_SESSION).await
            }
            BriefCommand::Cancel => {
                if self.store.delete(user_id).await {
                    self.reply(message, MSG_CANCELLED).await
                } else {
                    self.reply(message, MSG_NO_SESSION).await
                }
            }
            BriefCommand::Generate => self.handle_generate(message).await,
        }
    }

    /// Gate on message count, generate, mark completed, persist, send the document.
    async fn handle_generate(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        let Some(session) = self.store.get(user_id).await else {
            return self.reply(message, MSG_NO_SESSION).await;
        };
        if let Readiness::NotEnoughMessages { have, need } = brief_readiness(&session) {
            info!(user_id, have, need, "Brief requested too early");
            return self.reply(message, not_ready_text(have, need)).await;
        }

        self.bot.reply_to(message, MSG_GENERATING).await?;
        let document = match self.generator.generate(&session.messages).await {
            Ok(document) => document,
            Err(e) => {
                log_error_chain(&e, "Brief generation failed");
                return self.reply(message, MSG_REQUEST_FAILED).await;
            }
        };

        self.store.set_state(user_id, SessionState::Completed).await;
        self.store.save().await;

        let file_name = document_file_name(user_id, Local::now());
        if let Err(e) = self
            .bot
            .send_document(
                &message.chat,
                &file_name,
                document.into_bytes(),
                Some(MSG_BRIEF_CAPTION),
            )
            .await
        {
            error!(user_id, file_name = %file_name, error = %e, "Brief upload failed");
            return self.reply(message, MSG_REQUEST_FAILED).await;
        }
        info!(user_id, file_name = %file_name, "Brief sent");
        Ok(HandlerResponse::Stop)
    }

    // ---------- Conversation ----------

    async fn handle_text(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        match self.assembler.exchange(message.user.id, text).await {
            Ok(outcome) => {
                if outcome.ready_for_brief() {
                    info!(user_id = message.user.id, "Brief can be generated");
                }
                self.reply(message, outcome.reply).await
            }
            Err(ExchangeError::NoSession(_)) => self.reply(message, MSG_NO_SESSION).await,
            Err(ExchangeError::Backend(e)) => {
                log_error_chain(&e, "Conversation turn failed");
                self.reply(message, MSG_REQUEST_FAILED).await
            }
        }
    }

    /// Downloads and transcribes the voice note, echoes the recognized text, then continues as free text.
    async fn handle_voice(
        &self,
        message: &Message,
        file_id: &str,
        mime_type: Option<&str>,
    ) -> Result<HandlerResponse> {
        if self.store.get(message.user.id).await.is_none() {
            return self.reply(message, MSG_NO_SESSION).await;
        }

        let audio = match self.bot.download_file(file_id).await {
            Ok(audio) => audio,
            Err(e) => {
                error!(error = %e, "Voice download failed");
                return self.reply(message, MSG_REQUEST_FAILED).await;
            }
        };
        let text = match self
            .transcriber
            .transcribe(voice_file_name(mime_type), audio, &self.transcription_language)
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                log_error_chain(&e, "Transcription failed");
                return self.reply(message, MSG_REQUEST_FAILED).await;
            }
        };
        if text.is_empty() {
            return self.reply(message, MSG_EMPTY_TRANSCRIPTION).await;
        }

        self.bot.reply_to(message, &transcribed_text(&text)).await?;
        self.handle_text(message, &text).await
    }
}

#[async_trait]
impl Handler for BriefHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if let Some(voice) = &message.voice {
            return self
                .handle_voice(message, &voice.file_id, voice.mime_type.as_deref())
                .await;
        }
        if message.content.trim().is_empty() {
            return Ok(HandlerResponse::Ignore);
        }

        match parse_input(&message.content) {
            Input::Command(command) => {
                info!(command = ?command, "Command received");
                self.handle_command(message, command).await
            }
            Input::UnknownCommand(name) => {
                warn!(command = %name, "Unknown command");
                self.reply(message, MSG_UNKNOWN_COMMAND).await
            }
            Input::Text(text) => self.handle_text(message, text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_file_name_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(document_file_name(42, at), "brief_42_20240305_140709.md");
    }

    #[test]
    fn test_voice_file_name_by_mime() {
        assert_eq!(voice_file_name(Some("audio/ogg")), "voice.ogg");
        assert_eq!(voice_file_name(None), "voice.ogg");
        assert_eq!(voice_file_name(Some("audio/mpeg")), "voice.mp3");
    }
}
