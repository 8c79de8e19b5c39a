//! # Faucet bot
//!
//! Telegram front end for the testnet faucet. Wires dbot-telegram (transport), handler-chain,
//! the faucet crate (rate limit + dispense pipeline), storage and i18n. Loads config from env and
//! runs the dispatcher in long-polling or webhook mode.

pub mod auto_delete;
pub mod cli;
pub mod components;
pub mod config;
pub mod format;
pub mod handlers;
pub mod locale;
pub mod runner;

pub use cli::{load_config, print_faucet_address, Cli, Commands};
pub use components::{
    assemble_components, build_bot_components, build_handler_chain, create_ledger_client,
    create_stores, BotComponents, Stores,
};
pub use config::{FaucetBotConfig, StoreType};
pub use handlers::{
    CommandHandler, CommandRouter, DeleteCallbackHandler, FaucetHandler, HelpHandler,
    LanguageHandler, LoggingHandler, StartHandler,
};
pub use locale::Localizer;
pub use runner::{bot_commands, run_bot};
