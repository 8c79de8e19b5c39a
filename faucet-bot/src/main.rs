//! Binary for the faucet bot.

use anyhow::Result;
use clap::Parser;
use faucet_bot::{load_config, print_faucet_address, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Address => print_faucet_address(),
    }
}
