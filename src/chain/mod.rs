//! Network access: transport seam, consensus and runtime clients.
//!
//! All remote calls go through the [`Transport`] trait so the query and
//! transaction layers can be exercised against in-memory fakes. The real
//! transport is the JSON-RPC client in [`rpc`].

pub mod round;
pub mod rpc;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::config::{Network, ParaTime};
use crate::errors::{Error, Result};
use crate::tx::SignedTransaction;
use crate::types::{Action, Address, Proposal, Role};

pub use round::{resolve_round, HEIGHT_LATEST, ROUND_LATEST};

/// Raw request transport. One method call per network round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value>;
}

/// An established connection to a network endpoint.
#[derive(Clone)]
pub struct Connection {
    transport: Arc<dyn Transport>,
}

impl Connection {
    /// Connect to the network's configured RPC endpoint.
    pub fn connect(network: &Network) -> Result<Self> {
        debug!(rpc = %network.rpc, "connecting");
        Ok(Self {
            transport: Arc::new(rpc::HttpTransport::new(&network.rpc)?),
        })
    }

    /// Build a connection over an arbitrary transport. Used by tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn consensus(&self) -> ConsensusClient {
        ConsensusClient {
            transport: self.transport.clone(),
        }
    }

    pub fn runtime(&self, paratime: &ParaTime) -> RuntimeClient {
        RuntimeClient {
            transport: self.transport.clone(),
            runtime_id: paratime.id.clone(),
        }
    }
}

/// Consensus-layer queries.
pub struct ConsensusClient {
    transport: Arc<dyn Transport>,
}

impl ConsensusClient {
    /// Height of the latest finalized consensus block.
    pub async fn latest_height(&self) -> Result<i64> {
        let result = self
            .transport
            .call("consensus.GetLatestHeight", json!({}))
            .await?;
        decode(result)
    }

    /// Round of the runtime block the given runtime committed at the given
    /// consensus height.
    pub async fn runtime_round_at(&self, runtime_id: &str, height: i64) -> Result<u64> {
        let result = self
            .transport
            .call(
                "consensus.GetRuntimeRound",
                json!({ "runtime_id": runtime_id, "height": height }),
            )
            .await?;
        decode(result)
    }
}

/// Runtime-layer queries and transaction submission for one paratime.
pub struct RuntimeClient {
    transport: Arc<dyn Transport>,
    runtime_id: String,
}

impl RuntimeClient {
    pub fn runtime_id(&self) -> &str {
        &self.runtime_id
    }

    /// Identifier of the most recently submitted governance proposal.
    pub async fn proposal_id_info(&self, round: u64) -> Result<u32> {
        self.query("accounts.ProposalIDInfo", json!({ "round": round }))
            .await
    }

    /// Full state of one governance proposal.
    pub async fn proposal_info(&self, round: u64, id: u32) -> Result<Proposal> {
        self.query("accounts.ProposalInfo", json!({ "round": round, "id": id }))
            .await
    }

    /// Addresses holding the given role.
    pub async fn roles_team(&self, round: u64, role: Role) -> Result<Vec<Address>> {
        self.query(
            "accounts.RolesTeam",
            json!({ "round": round, "role": role.name() }),
        )
        .await
    }

    /// Configured quorum percentages keyed by action name.
    pub async fn quorums(&self, round: u64) -> Result<BTreeMap<String, u8>> {
        let mut out = BTreeMap::new();
        let all: BTreeMap<String, u8> = self
            .query("accounts.Quorums", json!({ "round": round }))
            .await?;
        for action in Action::QUORUM_BEARING {
            if let Some(q) = all.get(action.name()) {
                out.insert(action.name().to_string(), *q);
            }
        }
        Ok(out)
    }

    /// Current transaction nonce for an address.
    pub async fn nonce(&self, address: &Address) -> Result<u64> {
        self.query(
            "accounts.Nonce",
            json!({ "address": address.to_string() }),
        )
        .await
    }

    /// Submit a signed transaction and wait for inclusion.
    pub async fn submit_tx(&self, tx: &SignedTransaction) -> Result<serde_json::Value> {
        self.transport
            .call(
                "runtime.SubmitTx",
                json!({ "runtime_id": self.runtime_id, "tx": tx }),
            )
            .await
    }

    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        mut params: serde_json::Value,
    ) -> Result<T> {
        params["runtime_id"] = json!(self.runtime_id);
        let result = self.transport.call(method, params).await?;
        decode(result)
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Rpc(format!("malformed response: {e}")))
}
