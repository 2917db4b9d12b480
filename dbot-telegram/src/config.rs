//! Minimal framework config: token, Bot API URL, log file path.
//! Loaded from environment variables `BOT_TOKEN`, `TELEGRAM_API_URL`, `LOG_FILE`.

use anyhow::{Context, Result};
use std::env;

/// Telegram connectivity and logging config shared by all bots.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: String,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides `BOT_TOKEN`; one of them is required.
    /// `default_log_file` is used when `LOG_FILE` is unset.
    pub fn from_env(token: Option<String>, default_log_file: &str) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .context("BOT_TOKEN must be set in environment variables or .env file")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| default_log_file.to_string());
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds the teloxide Bot, pointing it at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
