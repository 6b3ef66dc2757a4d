//! Network management commands.

use clap::{Args, Subcommand};

use crate::cli::utils::{create_table_with_headers, print_success};
use crate::cli::Cli;
use crate::config::{Config, Network, ParaTimes};
use crate::types::DenominationInfo;

/// Network command container
#[derive(Args, Clone)]
pub struct NetworkCommand {
    #[command(subcommand)]
    pub command: NetworkCommands,
}

/// Available network operations
#[derive(Subcommand, Clone)]
pub enum NetworkCommands {
    /// Add a network endpoint
    Add {
        /// Name for the new network
        name: String,
        /// JSON-RPC endpoint URL
        rpc: String,
        /// Description of the network
        #[arg(long, default_value = "")]
        description: String,
        /// Consensus denomination symbol
        #[arg(long, default_value = "HELA")]
        symbol: String,
        /// Consensus denomination decimal places
        #[arg(long, default_value_t = 18)]
        exponent: u8,
    },

    /// Remove a configured network
    #[command(alias = "rm")]
    Remove {
        /// Network name
        name: String,
    },

    /// List configured networks
    List,

    /// Set the default network
    SetDefault {
        /// Network name
        name: String,
    },
}

/// Execute network commands
pub async fn execute(cmd: NetworkCommand, _cli: &Cli) -> anyhow::Result<()> {
    let mut cfg = Config::load(None)?;

    match cmd.command {
        NetworkCommands::Add {
            name,
            rpc,
            description,
            symbol,
            exponent,
        } => {
            cfg.networks.add(
                &name,
                Network {
                    rpc,
                    description,
                    denomination: DenominationInfo::new(symbol, exponent),
                    paratimes: ParaTimes::default(),
                },
            )?;
            cfg.save()?;
            print_success(&format!("Added network '{name}'"));
        }
        NetworkCommands::Remove { name } => {
            cfg.networks.remove(&name)?;
            cfg.save()?;
            print_success(&format!("Removed network '{name}'"));
        }
        NetworkCommands::List => {
            let mut table = create_table_with_headers(&["Name", "RPC", "Denomination"]);
            for (name, network) in &cfg.networks.all {
                let marker = if *name == cfg.networks.default {
                    format!("{name} (*)")
                } else {
                    name.clone()
                };
                table.add_row(vec![
                    marker,
                    network.rpc.clone(),
                    format!(
                        "{} ({} decimals)",
                        network.denomination.symbol, network.denomination.decimals
                    ),
                ]);
            }
            println!("{table}");
        }
        NetworkCommands::SetDefault { name } => {
            cfg.networks.set_default(&name)?;
            cfg.save()?;
            print_success(&format!("Default network is now '{name}'"));
        }
    }
    Ok(())
}
