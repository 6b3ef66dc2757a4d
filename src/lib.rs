//! Rust SDK and CLI for the HELA network.
//!
//! The library half exposes configuration, wallet, chain access, and
//! governance transaction building; the `hela` binary wires it all into a
//! command-line tool.

pub mod chain;
pub mod cli;
pub mod config;
pub mod errors;
pub mod tx;
pub mod types;
pub mod wallet;

pub use chain::{resolve_round, Connection, Transport, HEIGHT_LATEST, ROUND_LATEST};
pub use cli::{NpaSelection, SelectorFlags};
pub use config::Config;
pub use errors::{Error, Result};

// Re-export domain types
pub use types::*;

// Re-export transaction building and the sign/broadcast pipeline
pub use tx::{
    broadcast_tx, new_init_owners_tx, new_propose_tx, new_vote_tx, sign_paratime_tx,
    OfflineTransaction, SignedTransaction, Transaction, TransactionMeta, TxConfig,
};
