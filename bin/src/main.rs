//! samvat CLI - NSE ATM option historical data downloader.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "samvat")]
#[command(about = "NSE ATM option historical data downloader", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the environment file (defaults to the platform config dir)
    #[arg(long, global = true)]
    env: Option<PathBuf>,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: download catalogs, reconcile, fetch ATM data
    Run {
        /// Underlying symbol to fetch the ATM pair for
        #[arg(short, long, default_value = "NIFTY")]
        symbol: String,

        /// Strike granularity of the underlying's option chain
        #[arg(long, default_value = "50")]
        strike_step: f64,

        /// Override the target expiry (YYYY-MM-DD); defaults to the stored one
        #[arg(long)]
        expiry: Option<String>,
    },

    /// Obtain an access token from a browser login
    Auth {
        /// Authorization code; omit to be prompted for the redirect URL
        #[arg(long)]
        code: Option<String>,
    },

    /// Download both instrument dumps to the data directory
    Catalogs,

    /// List upcoming option expiries for an underlying
    Expiries {
        /// Underlying symbol
        #[arg(default_value = "NIFTY")]
        symbol: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let env_path = commands::env_path(cli.env)?;

    match command {
        Commands::Run {
            symbol,
            strike_step,
            expiry,
        } => {
            commands::run::run(&env_path, &symbol, strike_step, expiry.as_deref(), cli.quiet).await
        }
        Commands::Auth { code } => commands::auth::auth(&env_path, code.as_deref()).await,
        Commands::Catalogs => commands::catalogs::catalogs(&env_path, cli.quiet).await,
        Commands::Expiries { symbol } => commands::expiries::expiries(&env_path, &symbol),
    }
}
