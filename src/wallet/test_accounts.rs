//! Built-in deterministic accounts for local testing.
//!
//! Names under the reserved `test:` namespace map to fixed ed25519 keypairs
//! derived from well-known seeds. They exist so examples and integration
//! tests never need wallet files; never fund them on a real network.

use sha2::{Digest, Sha256};
use sp_core::{ed25519, Pair as PairTrait};

use crate::wallet::Account;

/// Prefix that routes an account name to the built-in test accounts.
pub const TEST_ACCOUNT_PREFIX: &str = "test:";

/// Names available under the `test:` namespace.
pub const TEST_ACCOUNT_NAMES: &[&str] = &["alice", "bob", "charlie", "dave", "erin"];

fn seed_for(name: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"hela/test-account/");
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

/// Look up a test account by its bare name (without the `test:` prefix).
pub fn lookup(name: &str) -> Option<Account> {
    if !TEST_ACCOUNT_NAMES.contains(&name) {
        return None;
    }
    let seed = seed_for(name);
    // from_seed_slice only fails on wrong seed length, which is fixed here.
    let pair = ed25519::Pair::from_seed_slice(&seed).ok()?;
    Some(Account::new(format!("{TEST_ACCOUNT_PREFIX}{name}"), pair))
}
