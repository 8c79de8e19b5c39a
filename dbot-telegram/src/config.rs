//! Framework configuration: token, API URL, log path and how updates are received.
//! Loaded from BOT_TOKEN / TG_BOT_API_KEY, TELEGRAM_API_URL, LOG_FILE, USE_WEBHOOK, WEBHOOK_URL, WEBHOOK_BIND_ADDR.

use anyhow::{Context, Result};
use reqwest::Url;
use std::env;
use std::net::SocketAddr;
use tracing::error;

pub const DEFAULT_WEBHOOK_BIND_ADDR: &str = "0.0.0.0:8000";

/// How the bot receives updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateMode {
    /// `getUpdates` long polling.
    Polling,
    /// Telegram pushes updates to `url`; an HTTP server listens on `bind_addr`.
    Webhook { url: Url, bind_addr: SocketAddr },
}

/// Telegram connectivity and logging.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
    pub update_mode: UpdateMode,
}

impl TelegramConfig {
    /// Loads from env. TG_BOT_API_KEY (or BOT_TOKEN) is required; WEBHOOK_URL is required when USE_WEBHOOK is true.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Like [`TelegramConfig::from_env`], but `token` overrides TG_BOT_API_KEY / BOT_TOKEN when given.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("TG_BOT_API_KEY")
                .or_else(|_| env::var("BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("TG_BOT_API_KEY (or BOT_TOKEN) not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        let update_mode = update_mode_from_env()?;
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            update_mode,
        })
    }

    /// Uses the given token; everything else unset, long polling.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
            update_mode: UpdateMode::Polling,
        }
    }

    /// Builds the teloxide Bot, pointing it at `telegram_api_url` when that parses.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => match Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

fn update_mode_from_env() -> Result<UpdateMode> {
    let use_webhook = env::var("USE_WEBHOOK")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if !use_webhook {
        return Ok(UpdateMode::Polling);
    }
    let url_str = env::var("WEBHOOK_URL").context("USE_WEBHOOK is set but WEBHOOK_URL is not")?;
    let url = Url::parse(&url_str).with_context(|| format!("Invalid WEBHOOK_URL: {}", url_str))?;
    let bind_str =
        env::var("WEBHOOK_BIND_ADDR").unwrap_or_else(|_| DEFAULT_WEBHOOK_BIND_ADDR.to_string());
    let bind_addr: SocketAddr = bind_str
        .parse()
        .with_context(|| format!("Invalid WEBHOOK_BIND_ADDR: {}", bind_str))?;
    Ok(UpdateMode::Webhook { url, bind_addr })
}
