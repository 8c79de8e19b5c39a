//! CLI parser and config loading.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledger_client::LocalAccount;
use std::env;

use crate::config::FaucetBotConfig;

#[derive(Parser)]
#[command(name = "faucet-bot")]
#[command(about = "Telegram testnet faucet bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the faucet bot (config from env; token can override TG_BOT_API_KEY / BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print the faucet account address derived from FAUCET_PRIVATE_KEY, to fund it.
    Address,
}

/// Load FaucetBotConfig from environment. If `token` is provided it overrides the env token.
pub fn load_config(token: Option<String>) -> Result<FaucetBotConfig> {
    FaucetBotConfig::load(token)
}

pub fn print_faucet_address() -> Result<()> {
    let key = env::var("FAUCET_PRIVATE_KEY").context("FAUCET_PRIVATE_KEY not set")?;
    let account = LocalAccount::from_private_key_hex(&key).context("Invalid FAUCET_PRIVATE_KEY")?;
    println!("{}", account.address());
    Ok(())
}
