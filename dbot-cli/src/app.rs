//! Bot assembly: config → tracing → Bot / backends → handler chain → REPL.

use std::sync::Arc;

use anyhow::{Context, Result};
use brief_handlers::{BriefConfig, BriefHandler};
use dbot_core::{init_tracing, Bot};
use dbot_telegram::{run_repl, TelegramBotAdapter, TelegramConfig};
use handler_chain::HandlerChain;
use llm_client::{EnvLlmConfig, LlmConfig, OpenAILlmClient};
use openai_client::mask_token;
use simple_handlers::{ChatHandler, LoggingHandler, TimeHandler};
use storage::{ConversationStore, LoadOutcome};
use tracing::{info, warn};

use crate::cli::Commands;

/// Runs the bot selected by `command` until the process is stopped.
pub async fn run(command: Commands) -> Result<()> {
    let telegram = TelegramConfig::from_env(command.token(), &command.default_log_file())?;
    init_tracing(&telegram.log_file)
        .with_context(|| format!("Failed to open log file {}", telegram.log_file))?;
    info!(bot = command.bot_name(), log_file = %telegram.log_file, "Starting");

    let teloxide_bot = telegram.build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let chain = match command {
        Commands::Time { .. } => time_chain(bot),
        Commands::Chat { .. } => chat_chain(bot)?,
        Commands::Brief { .. } => brief_chain(bot).await?,
    };

    run_repl(teloxide_bot, chain).await
}

fn time_chain(bot: Arc<dyn Bot>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(TimeHandler::new(bot)))
}

fn openai_client() -> Result<(EnvLlmConfig, OpenAILlmClient)> {
    let config = EnvLlmConfig::from_env()?;
    let client = OpenAILlmClient::from_config(&config)?;
    info!(
        api_key = %mask_token(config.api_key()),
        base_url = %config.base_url(),
        model = %config.model(),
        proxy = config.proxy_url().is_some(),
        "OpenAI client configured"
    );
    Ok((config, client))
}

fn chat_chain(bot: Arc<dyn Bot>) -> Result<HandlerChain> {
    let (config, client) = openai_client()?;
    let system_prompt = config
        .system_prompt()
        .unwrap_or(prompt::DEFAULT_CHAT_SYSTEM_PROMPT)
        .to_string();
    Ok(HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(ChatHandler::new(
            bot,
            Arc::new(client),
            system_prompt,
        ))))
}

async fn brief_chain(bot: Arc<dyn Bot>) -> Result<HandlerChain> {
    let (_, client) = openai_client()?;
    let brief = BriefConfig::from_env()?;
    info!(
        sessions_file = %brief.sessions_file.display(),
        trigger_token = %brief.trigger_token,
        history_window = ?brief.history_window,
        "Brief bot configured"
    );

    let (store, outcome) = ConversationStore::open(&brief.sessions_file).await;
    if let LoadOutcome::Degraded(e) = &outcome {
        warn!(error = %e, "Sessions file unusable; previous sessions are not restored");
    }

    let client = Arc::new(client);
    let handler = BriefHandler::new(
        bot,
        Arc::new(store),
        client.clone(),
        client,
        &brief,
    );
    Ok(HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(handler)))
}
