//! Time bot: `/start` greeting, otherwise the current server time for any text.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

pub const TIME_WELCOME: &str = "Привет! Я бот, который показывает текущее время сервера. \
Отправь мне любое сообщение, и я отвечу текущим временем!";

/// `🕐 Текущее время на сервере: YYYY-mm-dd HH:MM:SS`.
pub fn format_server_time(now: DateTime<Local>) -> String {
    format!(
        "🕐 Текущее время на сервере: {}",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

pub struct TimeHandler {
    bot: Arc<dyn Bot>,
}

impl TimeHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for TimeHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = match message.command() {
            Some(name) if name.eq_ignore_ascii_case("start") => TIME_WELCOME.to_string(),
            Some(_) => return Ok(HandlerResponse::Ignore),
            None if message.content.trim().is_empty() => return Ok(HandlerResponse::Ignore),
            None => format_server_time(Local::now()),
        };
        self.bot.reply_to(message, &text).await?;
        info!(user_id = message.user.id, "Time reply sent");
        Ok(HandlerResponse::Reply(text))
    }
}
