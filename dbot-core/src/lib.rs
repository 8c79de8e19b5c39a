//! # dbot-core
//!
//! Core types and traits for the Telegram bot: [`Bot`], [`Handler`], [`CallbackHandler`], message,
//! chat and user types, command parsing, and tracing initialization. Transport-agnostic; used by
//! dbot-telegram, handler-chain and the faucet bot.

pub mod bot;
pub mod command;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot, InlineButton, OutgoingMessage};
pub use command::Command;
pub use error::{DbotError, HandlerError, Result};
pub use logger::{init_tracing, mask_token};
pub use types::{
    CallbackHandler, CallbackQuery, Chat, ChatKind, Handler, HandlerResponse, Message,
    ToCoreMessage, ToCoreUser, User,
};
