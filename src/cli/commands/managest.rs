//! Stablecoin governance commands: proposals, votes, roles, and quorums.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Subcommand};

use crate::chain::{resolve_round, Connection, RuntimeClient, HEIGHT_LATEST};
use crate::cli::utils::{
    confirm, create_table_with_headers, print_info, print_success, print_warning, spinner,
};
use crate::cli::{Cli, NpaSelection};
use crate::config::Config;
use crate::errors::Error;
use crate::tx::{self, TxConfig};
use crate::types::{
    parse_proposal_id, Action, AddressResolver, ProposalContent, Role, RoleAddress, VoteProposal,
};
use crate::wallet::{self, WalletResolver, TEST_ACCOUNT_PREFIX};

/// Stablecoin governance command container
#[derive(Args, Clone)]
pub struct ManagestCommand {
    #[command(subcommand)]
    pub command: ManagestCommands,
}

/// Transaction signing and broadcast flags.
#[derive(Args, Clone, Default)]
pub struct TxFlags {
    /// Sign offline; no network access is performed
    #[arg(long)]
    pub offline: bool,

    /// Explicit nonce to sign with (offline mode)
    #[arg(long)]
    pub nonce: Option<u64>,

    /// File to write the signed transaction to (offline mode)
    #[arg(long)]
    pub output_file: Option<PathBuf>,
}

impl TxFlags {
    fn to_config(&self) -> TxConfig {
        TxConfig {
            offline: self.offline,
            nonce: self.nonce,
            output_file: self.output_file.clone(),
        }
    }
}

/// Available governance operations
#[derive(Subcommand, Clone)]
pub enum ManagestCommands {
    /// Show proposal information; the latest proposal is shown by default
    Showproposal {
        /// Proposal ID to query
        id: Option<String>,
        /// Consensus height to query at (0 means latest)
        #[arg(long, default_value_t = HEIGHT_LATEST)]
        height: i64,
    },

    /// Show accounts holding roles (Admin, MintProposer, MintVoter, ...)
    Showroles {
        /// Single role to query; all assignable roles by default
        role: Option<String>,
        /// Consensus height to query at (0 means latest)
        #[arg(long, default_value_t = HEIGHT_LATEST)]
        height: i64,
    },

    /// Show quorum percentages for governance actions
    Showquorums {
        /// Single action to query; all quorum-bearing actions by default
        action: Option<String>,
        /// Consensus height to query at (0 means latest)
        #[arg(long, default_value_t = HEIGHT_LATEST)]
        height: i64,
    },

    /// Initialize role assignments (address role pairs)
    Initowners {
        /// Alternating address and role arguments
        pairs: Vec<String>,
        #[command(flatten)]
        tx: TxFlags,
    },

    /// Submit a proposal from a JSON file
    Propose {
        /// Path to the proposal JSON document
        file: PathBuf,
        #[command(flatten)]
        tx: TxFlags,
    },

    /// Vote on a proposal with yes, no, or abstain
    Vote {
        /// Proposal ID
        id: String,
        /// Vote option
        option: String,
        #[command(flatten)]
        tx: TxFlags,
    },
}

/// Execute governance commands
pub async fn execute(cmd: ManagestCommand, cli: &Cli) -> anyhow::Result<()> {
    let cfg = Config::load(None)?;
    let npa = crate::cli::selector::resolve(&cfg, &cli.selector_flags())?;

    match cmd.command {
        ManagestCommands::Showproposal { id, height } => {
            show_proposal(&npa, id.as_deref(), height).await
        }
        ManagestCommands::Showroles { role, height } => {
            show_roles(&npa, role.as_deref(), height).await
        }
        ManagestCommands::Showquorums { action, height } => {
            show_quorums(&npa, action.as_deref(), height).await
        }
        ManagestCommands::Initowners { pairs, tx } => {
            init_owners(&cfg, &npa, &pairs, &tx.to_config(), cli.yes).await
        }
        ManagestCommands::Propose { file, tx } => {
            propose(&cfg, &npa, &file, &tx.to_config(), cli.yes).await
        }
        ManagestCommands::Vote { id, option, tx } => {
            vote(&cfg, &npa, &id, &option, &tx.to_config(), cli.yes).await
        }
    }
}

/// Connect and resolve the round to query at for the selected paratime.
async fn query_context(
    npa: &NpaSelection,
    height: i64,
) -> anyhow::Result<(RuntimeClient, u64, String)> {
    let paratime = npa.paratime()?;
    let conn = Connection::connect(&npa.network)?;
    let round = resolve_round(&conn.consensus(), &paratime.id, height).await?;
    let name = npa.paratime_name.clone().unwrap_or_default();
    Ok((conn.runtime(paratime), round, name))
}

async fn show_proposal(npa: &NpaSelection, id: Option<&str>, height: i64) -> anyhow::Result<()> {
    let (runtime, round, paratime_name) = query_context(npa, height).await?;

    let proposal_id = match id {
        Some(raw) => parse_proposal_id(raw)?,
        None => runtime.proposal_id_info(round).await?,
    };

    println!();
    println!("=== {} PARATIME ===", paratime_name.to_uppercase());
    println!("Queried proposal ID is: {proposal_id}");

    let proposal = runtime.proposal_info(round, proposal_id).await?;
    if proposal.content.action() == Action::NoAction {
        print_info("No such proposal");
        return Ok(());
    }

    println!("Proposal ID: {}", proposal.id);
    println!("Proposal Submitter: {}", proposal.submitter);
    println!("Proposal State: {}", proposal.state);
    println!("Proposal Content:");
    for (key, value) in proposal.content.display_fields() {
        println!("    {key}: {value}");
    }
    if !proposal.results.is_empty() {
        println!("Results:");
        for (option, count) in &proposal.results {
            println!("    Vote: {option}, Count: {count}");
        }
    }
    Ok(())
}

async fn show_roles(npa: &NpaSelection, role: Option<&str>, height: i64) -> anyhow::Result<()> {
    let (runtime, round, paratime_name) = query_context(npa, height).await?;

    let roles: Vec<Role> = match role {
        Some(raw) => vec![Role::from_str(raw)?],
        None => Role::ASSIGNABLE.to_vec(),
    };

    println!();
    println!("=== {} PARATIME ===", paratime_name.to_uppercase());
    let mut table = create_table_with_headers(&["Role", "Addresses"]);
    for role in roles {
        let addrs = runtime.roles_team(round, role).await?;
        if addrs.is_empty() {
            continue;
        }
        let joined = addrs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![role.to_string(), joined]);
    }
    println!("{table}");
    Ok(())
}

async fn show_quorums(npa: &NpaSelection, action: Option<&str>, height: i64) -> anyhow::Result<()> {
    let (runtime, round, paratime_name) = query_context(npa, height).await?;
    let quorums = runtime.quorums(round).await?;

    let actions: Vec<Action> = match action {
        Some(raw) => vec![Action::from_str(raw)?],
        None => Action::QUORUM_BEARING.to_vec(),
    };

    println!();
    println!("=== {} PARATIME ===", paratime_name.to_uppercase());
    println!("Quorums are:");
    for action in actions {
        match quorums.get(action.name()) {
            Some(q) if *q != 0 => println!("{}: {}%", action.name(), q),
            _ => {}
        }
    }
    Ok(())
}

/// Shared sign-and-broadcast tail for all transaction commands.
async fn submit(
    cfg: &Config,
    npa: &NpaSelection,
    tx: crate::tx::Transaction,
    tx_cfg: &TxConfig,
    yes: bool,
) -> anyhow::Result<()> {
    let paratime = npa.paratime()?;
    let account_name = &npa.account()?.name;
    if account_name.starts_with(TEST_ACCOUNT_PREFIX) {
        print_warning("Signing with a built-in test account; never use it on a real network");
    }
    let account = wallet::load_account(cfg, account_name)?;

    let conn = if tx_cfg.offline {
        None
    } else {
        Some(Connection::connect(&npa.network)?)
    };
    let runtime = conn.as_ref().map(|c| c.runtime(paratime));

    print_info(&format!(
        "Signing {} as {}",
        tx.call.method, account_name
    ));
    let (signed, meta) =
        tx::sign_paratime_tx(&account, paratime, runtime.as_ref(), tx, tx_cfg).await?;

    if !tx_cfg.offline && !confirm("Broadcast transaction?", yes) {
        print_info("Cancelled");
        return Ok(());
    }

    let sp = spinner("Broadcasting transaction...");
    let result = tx::broadcast_tx(runtime.as_ref(), &signed, &meta, tx_cfg).await;
    sp.finish_and_clear();

    match result? {
        Some(outcome) => print_success(&format!("Transaction executed: {outcome}")),
        None => print_success("Signed transaction written to file"),
    }
    Ok(())
}

async fn init_owners(
    cfg: &Config,
    npa: &NpaSelection,
    pairs: &[String],
    tx_cfg: &TxConfig,
    yes: bool,
) -> anyhow::Result<()> {
    npa.account()?;
    npa.paratime()?;
    if pairs.len() % 2 != 0 {
        return Err(Error::Config("expected alternating address and role arguments".to_string()).into());
    }

    let resolver = WalletResolver::new(cfg);
    let mut owners = Vec::with_capacity(pairs.len() / 2);
    for chunk in pairs.chunks(2) {
        owners.push(RoleAddress {
            addr: resolver.resolve(&chunk[0])?,
            role: Role::assignable_from_str(&chunk[1])?,
        });
    }

    submit(cfg, npa, tx::new_init_owners_tx(&owners), tx_cfg, yes).await
}

async fn propose(
    cfg: &Config,
    npa: &NpaSelection,
    file: &std::path::Path,
    tx_cfg: &TxConfig,
    yes: bool,
) -> anyhow::Result<()> {
    npa.account()?;
    // Paratime presence gates everything else; proposal fields cannot be
    // resolved without its native denomination.
    let paratime = npa.paratime()?;

    let raw = std::fs::read(file)?;
    let resolver = WalletResolver::new(cfg);
    let content = ProposalContent::parse(&raw, &resolver, &paratime.native_denomination())?;

    print_info(&format!("Proposing {} action", content.action()));
    submit(cfg, npa, tx::new_propose_tx(&content), tx_cfg, yes).await
}

async fn vote(
    cfg: &Config,
    npa: &NpaSelection,
    id: &str,
    option: &str,
    tx_cfg: &TxConfig,
    yes: bool,
) -> anyhow::Result<()> {
    npa.account()?;
    npa.paratime()?;

    let vote = VoteProposal {
        id: parse_proposal_id(id)?,
        option: option.parse()?,
    };
    submit(cfg, npa, tx::new_vote_tx(&vote), tx_cfg, yes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::selector::SelectedAccount;
    use crate::config::Network;
    use crate::types::DenominationInfo;
    use crate::wallet::test_accounts;
    use std::io::Write;

    fn selection_without_paratime() -> NpaSelection {
        NpaSelection {
            network_name: "testnet".to_string(),
            network: Network {
                rpc: "http://localhost:8545".to_string(),
                description: String::new(),
                denomination: DenominationInfo::new("HELA", 18),
                paratimes: Default::default(),
            },
            paratime_name: None,
            paratime: None,
            account: Some(SelectedAccount {
                name: "test:alice".to_string(),
                address: test_accounts::lookup("alice").unwrap().address(),
            }),
        }
    }

    #[tokio::test]
    async fn propose_without_paratime_fails_before_any_resolution() {
        // The file holds an unresolvable address and a garbage amount; if
        // anything were resolved before the paratime gate, one of those
        // errors would surface instead.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"{"action": "Mint", "data": {"address": "nobody-here", "amount": "not-a-number"}}"#,
        )
        .unwrap();

        let cfg = Config::default();
        let npa = selection_without_paratime();
        let err = propose(&cfg, &npa, &path, &TxConfig::default(), true)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NoParaTimeConfigured)
        ));
    }

    #[tokio::test]
    async fn vote_without_paratime_fails_before_connecting() {
        let cfg = Config::default();
        let npa = selection_without_paratime();
        let err = vote(&cfg, &npa, "42", "yes", &TxConfig::default(), true)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NoParaTimeConfigured)
        ));
    }
}
