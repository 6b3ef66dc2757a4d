//! ParaTime management commands.
//!
//! ParaTimes live under the selected network; the global `--network` flag
//! picks which network's table is edited.

use std::collections::BTreeMap;

use clap::{Args, Subcommand};

use crate::cli::utils::{create_table_with_headers, print_success};
use crate::cli::Cli;
use crate::config::{Config, Network, ParaTime};
use crate::errors::Error;
use crate::types::{DenominationInfo, NATIVE_DENOMINATION};

/// ParaTime command container
#[derive(Args, Clone)]
pub struct ParatimeCommand {
    #[command(subcommand)]
    pub command: ParatimeCommands,
}

/// Available paratime operations
#[derive(Subcommand, Clone)]
pub enum ParatimeCommands {
    /// Add a paratime under the selected network
    Add {
        /// Name for the new paratime
        name: String,
        /// Runtime identifier
        id: String,
        /// Description of the paratime
        #[arg(long, default_value = "")]
        description: String,
        /// Native denomination symbol
        #[arg(long, default_value = "HLUSD")]
        symbol: String,
        /// Native denomination decimal places
        #[arg(long, default_value_t = 9)]
        exponent: u8,
    },

    /// Remove a paratime from the selected network
    #[command(alias = "rm")]
    Remove {
        /// ParaTime name
        name: String,
    },

    /// List paratimes of the selected network
    List,

    /// Set the default paratime of the selected network
    SetDefault {
        /// ParaTime name
        name: String,
    },
}

fn selected_network<'a>(cfg: &'a mut Config, cli: &Cli) -> anyhow::Result<&'a mut Network> {
    if cfg.networks.all.is_empty() {
        return Err(Error::NoNetworksConfigured.into());
    }
    let name = cli
        .network
        .clone()
        .unwrap_or_else(|| cfg.networks.default.clone());
    cfg.networks
        .all
        .get_mut(&name)
        .ok_or_else(|| Error::NetworkNotFound(name).into())
}

/// Execute paratime commands
pub async fn execute(cmd: ParatimeCommand, cli: &Cli) -> anyhow::Result<()> {
    let mut cfg = Config::load(None)?;
    let network = selected_network(&mut cfg, cli)?;

    match cmd.command {
        ParatimeCommands::Add {
            name,
            id,
            description,
            symbol,
            exponent,
        } => {
            let mut denominations = BTreeMap::new();
            denominations.insert(
                NATIVE_DENOMINATION.to_string(),
                DenominationInfo::new(symbol, exponent),
            );
            network.paratimes.add(
                &name,
                ParaTime {
                    id,
                    description,
                    denominations,
                },
            )?;
            cfg.save()?;
            print_success(&format!("Added paratime '{name}'"));
        }
        ParatimeCommands::Remove { name } => {
            network.paratimes.remove(&name)?;
            cfg.save()?;
            print_success(&format!("Removed paratime '{name}'"));
        }
        ParatimeCommands::List => {
            let mut table = create_table_with_headers(&["Name", "ID", "Denomination"]);
            for (name, pt) in &network.paratimes.all {
                let marker = if *name == network.paratimes.default {
                    format!("{name} (*)")
                } else {
                    name.clone()
                };
                let denom = pt.native_denomination();
                table.add_row(vec![
                    marker,
                    pt.id.clone(),
                    format!("{} ({} decimals)", denom.symbol, denom.decimals),
                ]);
            }
            println!("{table}");
        }
        ParatimeCommands::SetDefault { name } => {
            network.paratimes.set_default(&name)?;
            cfg.save()?;
            print_success(&format!("Default paratime is now '{name}'"));
        }
    }
    Ok(())
}
