//! Transaction construction, signing, and broadcast.
//!
//! Builders produce unsigned [`Transaction`] values from validated domain
//! payloads. Signing binds a nonce and an ed25519 signature over a
//! domain-separated digest. Broadcast either submits through an open
//! connection or, in offline mode, writes the signed artifact to disk
//! without any network access.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::chain::RuntimeClient;
use crate::config::ParaTime;
use crate::errors::{Error, Result};
use crate::types::{BaseUnits, ProposalContent, RoleAddress, VoteProposal};
use crate::wallet::Account;

/// Domain separation context prepended to every signed digest.
const SIGNATURE_CONTEXT: &[u8] = b"hela/runtime-tx/v1";

/// Default artifact file for offline-signed transactions.
pub const DEFAULT_OFFLINE_OUTPUT: &str = "hela-signed-tx.json";

/// A runtime method invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub method: String,
    pub body: serde_json::Value,
}

/// Optional fee override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: BaseUnits,
    pub gas: u64,
}

/// An unsigned runtime transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub call: Call,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
}

impl Transaction {
    fn new(method: &str, body: serde_json::Value) -> Self {
        Self {
            call: Call {
                method: method.to_string(),
                body,
            },
            nonce: None,
            fee: None,
        }
    }
}

/// Transaction to seed the initial role assignments.
pub fn new_init_owners_tx(owners: &[RoleAddress]) -> Transaction {
    Transaction::new("accounts.InitOwners", json!({ "owners": owners }))
}

/// Transaction to submit a governance proposal.
pub fn new_propose_tx(content: &ProposalContent) -> Transaction {
    Transaction::new("accounts.ProposeST", json!(content))
}

/// Transaction to cast a vote on an active proposal.
pub fn new_vote_tx(vote: &VoteProposal) -> Transaction {
    Transaction::new("accounts.VoteST", json!(vote))
}

/// A transaction with its signature envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub tx: Transaction,
    /// Hex-encoded ed25519 signature over the domain-separated digest.
    pub signature: String,
    /// Hex-encoded signer public key.
    pub public_key: String,
}

/// Out-of-band data the broadcast stage needs alongside the signed bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionMeta {
    /// Runtime the transaction targets.
    pub runtime_id: String,
}

/// Artifact written by offline broadcast for later manual submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineTransaction {
    pub meta: TransactionMeta,
    pub tx: SignedTransaction,
}

/// Per-invocation signing and broadcast options.
#[derive(Debug, Clone, Default)]
pub struct TxConfig {
    /// Sign without any network access.
    pub offline: bool,
    /// Explicit nonce; required to be meaningful in offline mode.
    pub nonce: Option<u64>,
    /// Artifact path for offline mode.
    pub output_file: Option<PathBuf>,
}

fn signing_digest(tx: &Transaction) -> Result<[u8; 32]> {
    let encoded = serde_json::to_vec(tx)?;
    let mut hasher = Sha256::new();
    hasher.update(SIGNATURE_CONTEXT);
    hasher.update(&encoded);
    Ok(hasher.finalize().into())
}

/// Sign a runtime transaction.
///
/// Online mode resolves the signer's current nonce with a single query over
/// the given runtime client. Offline mode uses the explicit nonce from
/// `cfg`, defaulting to zero, and performs no network access.
pub async fn sign_paratime_tx(
    account: &Account,
    paratime: &ParaTime,
    runtime: Option<&RuntimeClient>,
    mut tx: Transaction,
    cfg: &TxConfig,
) -> Result<(SignedTransaction, TransactionMeta)> {
    if tx.nonce.is_none() {
        tx.nonce = Some(if cfg.offline {
            cfg.nonce.unwrap_or(0)
        } else {
            let runtime = runtime.ok_or(Error::NoParaTimeConfigured)?;
            runtime.nonce(&account.address()).await?
        });
    }
    let digest = signing_digest(&tx)?;
    let signature = account.sign(&digest);
    let signed = SignedTransaction {
        tx,
        signature: hex::encode(signature),
        public_key: account.public_key_hex(),
    };
    let meta = TransactionMeta {
        runtime_id: paratime.id.clone(),
    };
    Ok((signed, meta))
}

/// Broadcast a signed transaction, or write it to disk in offline mode.
///
/// Returns the node's execution result when online; `None` when the
/// artifact was written instead.
pub async fn broadcast_tx(
    runtime: Option<&RuntimeClient>,
    signed: &SignedTransaction,
    meta: &TransactionMeta,
    cfg: &TxConfig,
) -> Result<Option<serde_json::Value>> {
    if cfg.offline {
        let path = cfg
            .output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OFFLINE_OUTPUT));
        write_offline_artifact(&path, signed, meta)?;
        info!(path = %path.display(), "wrote offline transaction");
        return Ok(None);
    }
    let runtime = runtime.ok_or(Error::NoParaTimeConfigured)?;
    let result = runtime.submit_tx(signed).await?;
    Ok(Some(result))
}

fn write_offline_artifact(
    path: &Path,
    signed: &SignedTransaction,
    meta: &TransactionMeta,
) -> Result<()> {
    let artifact = OfflineTransaction {
        meta: meta.clone(),
        tx: signed.clone(),
    };
    let mut data = serde_json::to_vec_pretty(&artifact)?;
    data.push(b'\n');
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DenominationInfo, VoteOption, NATIVE_DENOMINATION};
    use crate::wallet::test_accounts;
    use sp_core::{ed25519, Pair as PairTrait};
    use std::collections::BTreeMap;

    fn alice() -> Account {
        test_accounts::lookup("alice").unwrap()
    }

    fn paratime() -> ParaTime {
        let mut denominations = BTreeMap::new();
        denominations.insert(
            NATIVE_DENOMINATION.to_string(),
            DenominationInfo::new("HLUSD", 9),
        );
        ParaTime {
            id: "beef".to_string(),
            description: String::new(),
            denominations,
        }
    }

    #[test]
    fn test_builder_methods() {
        let vote = VoteProposal {
            id: 7,
            option: VoteOption::Yes,
        };
        let tx = new_vote_tx(&vote);
        assert_eq!(tx.call.method, "accounts.VoteST");
        assert_eq!(tx.call.body["id"], 7);
        assert!(tx.nonce.is_none());

        let tx = new_init_owners_tx(&[]);
        assert_eq!(tx.call.method, "accounts.InitOwners");
    }

    #[tokio::test]
    async fn test_offline_sign_uses_explicit_nonce() {
        let cfg = TxConfig {
            offline: true,
            nonce: Some(42),
            output_file: None,
        };
        let tx = new_vote_tx(&VoteProposal {
            id: 1,
            option: VoteOption::No,
        });
        let (signed, meta) = sign_paratime_tx(&alice(), &paratime(), None, tx, &cfg)
            .await
            .unwrap();
        assert_eq!(signed.tx.nonce, Some(42));
        assert_eq!(meta.runtime_id, "beef");
    }

    #[tokio::test]
    async fn test_offline_sign_defaults_nonce_to_zero() {
        let cfg = TxConfig {
            offline: true,
            ..Default::default()
        };
        let tx = new_init_owners_tx(&[]);
        let (signed, _) = sign_paratime_tx(&alice(), &paratime(), None, tx, &cfg)
            .await
            .unwrap();
        assert_eq!(signed.tx.nonce, Some(0));
    }

    #[tokio::test]
    async fn test_signature_verifies() {
        let cfg = TxConfig {
            offline: true,
            nonce: Some(3),
            output_file: None,
        };
        let account = alice();
        let tx = new_vote_tx(&VoteProposal {
            id: 5,
            option: VoteOption::Abstain,
        });
        let (signed, _) = sign_paratime_tx(&account, &paratime(), None, tx, &cfg)
            .await
            .unwrap();

        let digest = signing_digest(&signed.tx).unwrap();
        let sig_bytes: [u8; 64] = hex::decode(&signed.signature)
            .unwrap()
            .try_into()
            .unwrap();
        let pk_bytes: [u8; 32] = hex::decode(&signed.public_key)
            .unwrap()
            .try_into()
            .unwrap();
        assert!(ed25519::Pair::verify(
            &ed25519::Signature::from_raw(sig_bytes),
            digest,
            &ed25519::Public::from_raw(pk_bytes),
        ));
    }

    #[tokio::test]
    async fn test_offline_broadcast_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signed.json");
        let cfg = TxConfig {
            offline: true,
            nonce: Some(1),
            output_file: Some(path.clone()),
        };
        let tx = new_vote_tx(&VoteProposal {
            id: 2,
            option: VoteOption::Yes,
        });
        let (signed, meta) = sign_paratime_tx(&alice(), &paratime(), None, tx, &cfg)
            .await
            .unwrap();
        let result = broadcast_tx(None, &signed, &meta, &cfg).await.unwrap();
        assert!(result.is_none());

        let raw = std::fs::read(&path).unwrap();
        let loaded: OfflineTransaction = serde_json::from_slice(&raw).unwrap();
        assert_eq!(loaded.tx, signed);
        assert_eq!(loaded.meta.runtime_id, "beef");
    }

    #[tokio::test]
    async fn test_online_sign_without_runtime_fails() {
        let cfg = TxConfig::default();
        let tx = new_init_owners_tx(&[]);
        assert!(matches!(
            sign_paratime_tx(&alice(), &paratime(), None, tx, &cfg).await,
            Err(Error::NoParaTimeConfigured)
        ));
    }
}
