//! Wallet management commands.

use clap::{Args, Subcommand};

use crate::cli::utils::{confirm, create_table_with_headers, print_info, print_success};
use crate::cli::Cli;
use crate::config::Config;
use crate::wallet;

/// Wallet command container
#[derive(Args, Clone)]
pub struct WalletCommand {
    #[command(subcommand)]
    pub command: WalletCommands,
}

/// Available wallet operations
#[derive(Subcommand, Clone)]
pub enum WalletCommands {
    /// Create a new account with a freshly generated key
    Create {
        /// Account name
        name: String,
    },

    /// Import an account from a hex-encoded ed25519 seed
    Import {
        /// Account name
        name: String,
        /// 32-byte seed, hex encoded
        seed: String,
    },

    /// List wallet accounts
    List,

    /// Remove an account and its keyfile
    #[command(alias = "rm")]
    Remove {
        /// Account name
        name: String,
    },

    /// Set the default account
    SetDefault {
        /// Account name
        name: String,
    },
}

/// Execute wallet commands
pub async fn execute(cmd: WalletCommand, cli: &Cli) -> anyhow::Result<()> {
    let mut cfg = Config::load(None)?;

    match cmd.command {
        WalletCommands::Create { name } => {
            let account = wallet::create_account(&mut cfg, &name)?;
            cfg.save()?;
            print_success(&format!("Created account '{name}'"));
            print_info(&format!("Address: {}", account.address()));
        }
        WalletCommands::Import { name, seed } => {
            let account = wallet::import_account(&mut cfg, &name, &seed)?;
            cfg.save()?;
            print_success(&format!("Imported account '{name}'"));
            print_info(&format!("Address: {}", account.address()));
        }
        WalletCommands::List => {
            let mut table = create_table_with_headers(&["Name", "Address"]);
            for (name, entry) in &cfg.wallet.all {
                let marker = if *name == cfg.wallet.default {
                    format!("{name} (*)")
                } else {
                    name.clone()
                };
                table.add_row(vec![marker, entry.address.clone()]);
            }
            println!("{table}");
        }
        WalletCommands::Remove { name } => {
            if !confirm(
                &format!("Remove account '{name}' and delete its keyfile?"),
                cli.yes,
            ) {
                print_info("Cancelled");
                return Ok(());
            }
            wallet::remove_account(&mut cfg, &name)?;
            cfg.save()?;
            print_success(&format!("Removed account '{name}'"));
        }
        WalletCommands::SetDefault { name } => {
            cfg.wallet.set_default(&name)?;
            cfg.save()?;
            print_success(&format!("Default account is now '{name}'"));
        }
    }
    Ok(())
}
