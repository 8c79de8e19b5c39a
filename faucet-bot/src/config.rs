//! Faucet bot config: Telegram connectivity plus ledger, faucet, storage and locale settings. Loaded from env.

use anyhow::{bail, Context, Result};
use dbot_core::mask_token;
use dbot_telegram::TelegramConfig;
use ledger_client::{LocalAccount, Network};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Where rate-limit and locale records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// Lost on restart.
    Memory,
    Sqlite,
}

impl FromStr for StoreType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreType::Memory),
            "sqlite" => Ok(StoreType::Sqlite),
            other => bail!("STORE_TYPE must be memory or sqlite, got {}", other),
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreType::Memory => f.write_str("memory"),
            StoreType::Sqlite => f.write_str("sqlite"),
        }
    }
}

#[derive(Clone)]
pub struct FaucetBotConfig {
    pub telegram: TelegramConfig,
    /// FAUCET_PRIVATE_KEY, hex
    pub faucet_private_key: String,
    /// APTOS_NETWORK
    pub network: Network,
    /// APTOS_NODE_URL; the network's public fullnode when unset
    pub node_url: Option<String>,
    /// FAUCET_AMOUNT, octas per request
    pub faucet_amount: u64,
    /// FAUCET_COOLDOWN_SECS
    pub cooldown_secs: u64,
    /// AUTO_DELETE_SECS
    pub auto_delete_secs: u64,
    /// CONFIRMATION_TIMEOUT_SECS
    pub confirmation_timeout_secs: u64,
    /// STORE_TYPE
    pub store_type: StoreType,
    /// DATABASE_URL, used when store_type is sqlite
    pub database_url: String,
    /// DEFAULT_LOCALE
    pub default_locale: String,
    /// LOG_FILE
    pub log_file: String,
}

impl fmt::Debug for FaucetBotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaucetBotConfig")
            .field("bot_token", &mask_token(&self.telegram.bot_token))
            .field("telegram_api_url", &self.telegram.telegram_api_url)
            .field("update_mode", &self.telegram.update_mode)
            .field("faucet_private_key", &"***")
            .field("network", &self.network)
            .field("node_url", &self.node_url())
            .field("faucet_amount", &self.faucet_amount)
            .field("cooldown_secs", &self.cooldown_secs)
            .field("auto_delete_secs", &self.auto_delete_secs)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .field("store_type", &self.store_type)
            .field("database_url", &self.database_url)
            .field("default_locale", &self.default_locale)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Reads `key` and parses it; `default` when unset. A set but unparsable value is an error.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}={}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

impl FaucetBotConfig {
    /// Load from environment variables. `token` overrides TG_BOT_API_KEY / BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let faucet_private_key =
            env::var("FAUCET_PRIVATE_KEY").context("FAUCET_PRIVATE_KEY not set")?;
        let network = match env::var("APTOS_NETWORK") {
            Ok(raw) => raw.parse::<Network>().map_err(anyhow::Error::msg)?,
            Err(_) => Network::Testnet,
        };
        let node_url = env::var("APTOS_NODE_URL").ok().filter(|s| !s.trim().is_empty());
        let log_file = telegram
            .log_file
            .clone()
            .unwrap_or_else(|| "logs/faucet-bot.log".to_string());

        Ok(Self {
            telegram,
            faucet_private_key,
            network,
            node_url,
            faucet_amount: env_parse("FAUCET_AMOUNT", 10_000_000)?,
            cooldown_secs: env_parse("FAUCET_COOLDOWN_SECS", 3600)?,
            auto_delete_secs: env_parse("AUTO_DELETE_SECS", 5)?,
            confirmation_timeout_secs: env_parse("CONFIRMATION_TIMEOUT_SECS", 20)?,
            store_type: env_parse("STORE_TYPE", StoreType::Memory)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "./data/faucet.db".to_string()),
            default_locale: env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
            log_file,
        })
    }

    /// Checks URLs, the private key and amounts before anything connects.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.node_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!("APTOS_NODE_URL is not a valid URL: {}", url_str);
            }
        }
        LocalAccount::from_private_key_hex(&self.faucet_private_key)
            .context("FAUCET_PRIVATE_KEY is not a valid Ed25519 private key")?;
        if self.faucet_amount == 0 {
            bail!("FAUCET_AMOUNT must be greater than 0");
        }
        if self.confirmation_timeout_secs == 0 {
            bail!("CONFIRMATION_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    /// Fullnode REST URL: APTOS_NODE_URL, or the network default.
    pub fn node_url(&self) -> String {
        self.node_url
            .clone()
            .unwrap_or_else(|| self.network.node_url().to_string())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn auto_delete_delay(&self) -> Duration {
        Duration::from_secs(self.auto_delete_secs)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}
