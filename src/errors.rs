//! Error types for the HELA client.
//!
//! Every failure surfaced by the SDK maps onto one variant here; the CLI
//! prints the message and exits non-zero. There is no local recovery — a
//! failed stage aborts the whole command.

use thiserror::Error;

/// Unified error type for all HELA client operations.
#[derive(Debug, Error)]
pub enum Error {
    // Configuration errors
    #[error("no networks configured")]
    NoNetworksConfigured,
    #[error("network '{0}' does not exist")]
    NetworkNotFound(String),
    #[error("paratime '{0}' does not exist")]
    ParaTimeNotFound(String),
    #[error("account '{0}' does not exist in the wallet")]
    AccountNotFound(String),
    #[error("configuration error: {0}")]
    Config(String),

    // Input errors
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("invalid fields for {action} proposal: {detail}")]
    InvalidProposalFields {
        action: &'static str,
        detail: &'static str,
    },
    #[error("invalid proposal ID '{0}'")]
    InvalidProposalId(String),
    #[error("unresolvable address '{0}'")]
    UnresolvableAddress(String),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("unknown vote option '{0}'")]
    UnknownVoteOption(String),

    // Operational errors
    #[error("no paratime configured")]
    NoParaTimeConfigured,
    #[error("no accounts configured in your wallet")]
    NoAccountConfigured,
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("wallet error: {0}")]
    Wallet(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for HELA client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error originated from the transport layer.
    pub fn is_rpc(&self) -> bool {
        matches!(self, Error::Rpc(_))
    }
}
