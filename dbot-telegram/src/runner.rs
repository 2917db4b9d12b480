//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts the REPL with the given teloxide Bot and HandlerChain.
///
/// The dispatcher runs updates of one chat sequentially and different chats concurrently, so each
/// message is handled to completion before the next one from the same user. Handler errors are
/// logged and never stop the loop.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = ?me.user.username,
            handlers = handler_chain.len(),
            "Bot is starting..."
        ),
        Err(e) => error!(error = %e, "getMe failed; starting anyway"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            debug!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                "Dispatching update"
            );

            if let Err(e) = chain.handle(&core_msg).await {
                error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
            }

            respond(())
        }
    })
    .await;

    Ok(())
}
