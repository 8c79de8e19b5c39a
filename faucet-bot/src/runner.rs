//! Entry point: init logging, validate config, build components, register commands, then dispatch.

use anyhow::Result;
use dbot_core::init_tracing;
use dbot_telegram::{register_commands, run_dispatcher};
use std::sync::Arc;
use teloxide::prelude::Requester;
use tracing::{info, instrument, warn};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::FaucetBotConfig;
use crate::format::format_apt;
use crate::handlers::DeleteCallbackHandler;

/// `(command, description)` pairs for the Telegram command menu.
pub fn bot_commands(faucet_amount: u64) -> Vec<(String, String)> {
    vec![
        ("start".to_string(), "Start the bot".to_string()),
        ("help".to_string(), "Show help text".to_string()),
        (
            "faucet".to_string(),
            format!("Get {} testnet APT token", format_apt(faucet_amount)),
        ),
        ("language".to_string(), "Set language".to_string()),
    ]
}

#[instrument(skip(config))]
pub async fn run_bot(config: FaucetBotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        network = %config.network,
        store_type = %config.store_type,
        faucet_amount = config.faucet_amount,
        cooldown_secs = config.cooldown_secs,
        "Initializing faucet bot"
    );

    let teloxide_bot = config.telegram.build_bot();
    let bot_username = match teloxide_bot.get_me().await {
        Ok(me) => {
            info!(username = ?me.user.username, "step: fetched bot identity");
            me.user.username.clone()
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch bot username; accepting commands for any @bot");
            None
        }
    };
    let components = build_bot_components(&config, teloxide_bot.clone())
        .await?
        .with_bot_username(bot_username);
    let handler_chain = build_handler_chain(&components);
    let callback_handler = Arc::new(DeleteCallbackHandler::new(components.bot.clone()));

    if let Err(e) = register_commands(&teloxide_bot, bot_commands(config.faucet_amount)).await {
        warn!(error = %e, "Continuing without command menu");
    }

    info!("Bot started successfully");

    run_dispatcher(
        teloxide_bot,
        handler_chain,
        callback_handler,
        config.telegram.update_mode.clone(),
    )
    .await
}
