//! Builds the bot's shared components from config and assembles the handler chain.

use anyhow::{Context, Result};
use dbot_core::Bot;
use dbot_telegram::TelegramBotAdapter;
use faucet::{Clock, Dispenser, Faucet, RateLimiter, SystemClock};
use handler_chain::HandlerChain;
use i18n::I18n;
use ledger_client::{AptosClientOptions, AptosLedgerClient, LedgerClient, LocalAccount, Network};
use std::sync::Arc;
use storage::{InMemoryStore, LocaleStore, RateLimitStore, SqliteStore};
use tracing::{error, info, instrument};

use crate::auto_delete::AutoDeleter;
use crate::config::{FaucetBotConfig, StoreType};
use crate::handlers::{
    CommandRouter, FaucetHandler, HelpHandler, LanguageHandler, LoggingHandler, StartHandler,
};
use crate::locale::Localizer;

/// Everything handlers need. Cheap to clone.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub faucet: Faucet,
    pub localizer: Arc<Localizer>,
    pub auto_delete: AutoDeleter,
    pub network: Network,
    /// From `getMe` at startup; `None` when unknown.
    pub bot_username: Option<String>,
}

impl BotComponents {
    pub fn with_bot_username(mut self, bot_username: Option<String>) -> Self {
        self.bot_username = bot_username;
        self
    }
}

/// Rate-limit and locale stores, backed by the same storage.
pub struct Stores {
    pub rate_limits: Arc<dyn RateLimitStore>,
    pub locales: Arc<dyn LocaleStore>,
}

#[instrument(skip(config))]
pub async fn create_stores(config: &FaucetBotConfig) -> Result<Stores> {
    match config.store_type {
        StoreType::Memory => {
            let store = Arc::new(InMemoryStore::new());
            Ok(Stores {
                rate_limits: store.clone(),
                locales: store,
            })
        }
        StoreType::Sqlite => {
            let store = Arc::new(SqliteStore::new(&config.database_url).await.map_err(|e| {
                error!(
                    error = %e,
                    database_url = %config.database_url,
                    "Failed to initialize faucet storage"
                );
                anyhow::anyhow!("Failed to initialize faucet storage: {}", e)
            })?);
            Ok(Stores {
                rate_limits: store.clone(),
                locales: store,
            })
        }
    }
}

/// Aptos client signing with the configured faucet key.
pub fn create_ledger_client(config: &FaucetBotConfig) -> Result<AptosLedgerClient> {
    let account = LocalAccount::from_private_key_hex(&config.faucet_private_key)
        .context("Invalid FAUCET_PRIVATE_KEY")?;
    let options = AptosClientOptions {
        confirmation_timeout: config.confirmation_timeout(),
        ..AptosClientOptions::default()
    };
    Ok(AptosLedgerClient::new(config.node_url(), account, options))
}

/// Wires components around an already-built bot, ledger and stores. Tests pass mocks here.
pub fn assemble_components(
    config: &FaucetBotConfig,
    bot: Arc<dyn Bot>,
    ledger: Arc<dyn LedgerClient>,
    stores: Stores,
    clock: Arc<dyn Clock>,
) -> Result<BotComponents> {
    let i18n = I18n::embedded(&config.default_locale).context("Failed to load locales")?;
    let faucet = Faucet::new(
        RateLimiter::new(stores.rate_limits, config.cooldown()),
        Dispenser::new(ledger, config.faucet_amount),
        clock,
    );
    Ok(BotComponents {
        auto_delete: AutoDeleter::new(bot.clone(), config.auto_delete_delay()),
        bot,
        faucet,
        localizer: Arc::new(Localizer::new(i18n, stores.locales)),
        network: config.network,
        bot_username: None,
    })
}

/// Production components: Telegram adapter, Aptos client, configured store, wall clock.
#[instrument(skip(config, teloxide_bot))]
pub async fn build_bot_components(
    config: &FaucetBotConfig,
    teloxide_bot: teloxide::Bot,
) -> Result<BotComponents> {
    let stores = create_stores(config).await?;
    let ledger = create_ledger_client(config)?;
    info!(
        node_url = %ledger.node_url(),
        faucet_address = %ledger.sender(),
        "Ledger client ready"
    );
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot));
    assemble_components(config, bot, Arc::new(ledger), stores, Arc::new(SystemClock))
}

/// Logging first, then the command router.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let router = CommandRouter::new()
        .route("start", Arc::new(StartHandler::new(components.clone())))
        .route("help", Arc::new(HelpHandler::new(components.clone())))
        .route("faucet", Arc::new(FaucetHandler::new(components.clone())))
        .route("language", Arc::new(LanguageHandler::new(components.clone())))
        .with_bot_username(components.bot_username.clone());

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(router))
}
