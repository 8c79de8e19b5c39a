//! Error types shared by the bot framework crates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// Transport failure (Telegram API call rejected or unreachable).
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Malformed callback data: {0}")]
    MalformedCallback(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;
