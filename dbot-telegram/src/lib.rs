//! # dbot-telegram
//!
//! Telegram bot framework layer: adapters, [`dbot_core::Bot`] implementation, minimal config, and a
//! dispatcher runner (long polling or webhook) that feeds messages to a handler chain and callback
//! queries to a [`dbot_core::CallbackHandler`].
//! Handles only Telegram connectivity; no faucet or storage logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, UpdateMode};
pub use runner::{register_commands, run_dispatcher};
