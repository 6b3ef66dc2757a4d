//! CLI tool for the HELA network.
//!
//! This module provides the command-line interface for interacting with a
//! HELA network and its paratimes.
//!
//! # Commands
//!
//! - `network` - Network endpoint management
//! - `paratime` - ParaTime management under a network
//! - `wallet` - Account creation and management
//! - `managest` - Stablecoin governance operations

use clap::{Parser, Subcommand};

pub mod commands;
pub mod selector;
pub mod utils;

pub use selector::{NpaSelection, SelectedAccount, SelectorFlags};

/// HELA CLI - Rust implementation
#[derive(Parser)]
#[command(name = "hela")]
#[command(author = "HELA Labs")]
#[command(version = "0.1.0")]
#[command(about = "HELA network CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Network to use (overrides the configured default)
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// ParaTime to use (overrides the configured default)
    #[arg(long, global = true)]
    pub paratime: Option<String>,

    /// Force no paratime selection
    #[arg(long, global = true, conflicts_with = "paratime")]
    pub no_paratime: bool,

    /// Account to sign with (overrides the configured default)
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// Don't prompt for confirmations (auto-approve)
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

impl Cli {
    /// Selector flags extracted from the global arguments.
    pub fn selector_flags(&self) -> SelectorFlags {
        SelectorFlags {
            network: self.network.clone(),
            paratime: self.paratime.clone(),
            no_paratime: self.no_paratime,
            account: self.account.clone(),
        }
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Network management (add, remove, list, set-default)
    #[command(alias = "net")]
    Network(commands::network::NetworkCommand),

    /// ParaTime management (add, remove, list, set-default)
    #[command(alias = "pt")]
    Paratime(commands::paratime::ParatimeCommand),

    /// Wallet operations (create, import, list, remove)
    #[command(alias = "w")]
    Wallet(commands::wallet::WalletCommand),

    /// Stablecoin governance operations
    #[command(alias = "st")]
    Managest(commands::managest::ManagestCommand),
}

/// Run the CLI application
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Network(cmd) => commands::network::execute(cmd.clone(), &cli).await,
        Commands::Paratime(cmd) => commands::paratime::execute(cmd.clone(), &cli).await,
        Commands::Wallet(cmd) => commands::wallet::execute(cmd.clone(), &cli).await,
        Commands::Managest(cmd) => commands::managest::execute(cmd.clone(), &cli).await,
    }
}
