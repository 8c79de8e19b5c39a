//! Dispatcher runner: messages go to the [`HandlerChain`], callback queries to a [`CallbackHandler`].
//! Every update is handled in its own task; errors are logged and never stop the dispatcher.

use anyhow::{Context, Result};
use dbot_core::{CallbackHandler, ToCoreMessage};
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::update_listeners::webhooks;
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::config::UpdateMode;

/// Publishes the `/` command menu. `commands` are `(name, description)` pairs.
pub async fn register_commands(bot: &teloxide::Bot, commands: Vec<(String, String)>) -> Result<()> {
    let commands: Vec<BotCommand> = commands
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description))
        .collect();
    bot.set_my_commands(commands)
        .await
        .context("Failed to register bot commands")?;
    Ok(())
}

/// Runs until Ctrl-C. In webhook mode the listener registers `url` with Telegram and serves it on `bind_addr`.
#[instrument(skip(bot, handler_chain, callback_handler))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    callback_handler: Arc<dyn CallbackHandler>,
    mode: UpdateMode,
) -> Result<()> {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![handler_chain, callback_handler])
        .enable_ctrlc_handler()
        .build();

    match mode {
        UpdateMode::Polling => {
            info!("Starting long polling");
            dispatcher.dispatch().await;
        }
        UpdateMode::Webhook { url, bind_addr } => {
            info!(url = %url, bind_addr = %bind_addr, "Starting webhook listener");
            let listener = webhooks::axum(bot, webhooks::Options::new(bind_addr, url))
                .await
                .context("Failed to set up webhook")?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    info!("Dispatcher stopped");
    Ok(())
}

/// Text messages with a sender user become core messages; everything else is skipped.
fn incoming_message(msg: &Message) -> Option<dbot_core::Message> {
    if msg.text().is_none() {
        debug!(chat_id = msg.chat.id.0, "Skipping non-text message");
        return None;
    }
    let core_msg = TelegramMessageWrapper(msg).to_core();
    if core_msg.is_none() {
        debug!(chat_id = msg.chat.id.0, "Skipping message without a sender user");
    }
    core_msg
}

async fn on_message(msg: Message, handler_chain: HandlerChain) -> ResponseResult<()> {
    let Some(core_msg) = incoming_message(&msg) else {
        return Ok(());
    };

    // Run the chain in its own task so a slow faucet request does not hold up other updates.
    tokio::spawn(async move {
        if let Err(e) = handler_chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });

    Ok(())
}

async fn on_callback_query(
    bot: Bot,
    query: CallbackQuery,
    callback_handler: Arc<dyn CallbackHandler>,
) -> ResponseResult<()> {
    // Stop the client's loading spinner whatever the handler decides.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let core_query = TelegramCallbackWrapper(&query).to_core();
    info!(
        user_id = core_query.user.id,
        data = %core_query.data,
        "Received callback query"
    );

    tokio::spawn(async move {
        if let Err(e) = callback_handler.handle_callback(&core_query).await {
            error!(error = %e, user_id = core_query.user.id, "Callback handler failed");
        }
    });

    Ok(())
}
