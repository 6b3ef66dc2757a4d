//! Local wallet: account storage, key loading, and name resolution.
//!
//! Each account's key material lives in its own keyfile under
//! `<config dir>/wallet/<name>.json` as a hex-encoded ed25519 seed. The
//! configuration document only records the public address; losing the
//! keyfile loses the key.

pub mod test_accounts;

use std::fs;
use std::path::PathBuf;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sp_core::{ed25519, Pair as PairTrait};
use zeroize::Zeroizing;

use crate::config::{AccountConfig, Config};
use crate::errors::{Error, Result};
use crate::types::{Address, AddressResolver};

pub use test_accounts::TEST_ACCOUNT_PREFIX;

/// A loaded account with signing capability.
#[derive(Clone)]
pub struct Account {
    name: String,
    pair: ed25519::Pair,
}

impl Account {
    pub(crate) fn new(name: String, pair: ed25519::Pair) -> Self {
        Self { name, pair }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.pair.public())
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.pair.public())
    }

    /// Sign a message with the account's ed25519 key.
    pub fn sign(&self, message: &[u8]) -> ed25519::Signature {
        self.pair.sign(message)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("address", &self.address().to_string())
            .finish()
    }
}

/// On-disk keyfile contents.
#[derive(Serialize, Deserialize)]
struct Keyfile {
    address: String,
    seed: String,
}

fn keyfile_path(cfg: &Config, name: &str) -> Result<PathBuf> {
    Ok(cfg.dir()?.join("wallet").join(format!("{name}.json")))
}

fn account_from_seed(name: &str, seed: &[u8]) -> Result<Account> {
    let pair = ed25519::Pair::from_seed_slice(seed)
        .map_err(|_| Error::Wallet(format!("invalid seed for account '{name}'")))?;
    Ok(Account::new(name.to_string(), pair))
}

fn write_keyfile(cfg: &Config, name: &str, account: &Account, seed: &[u8]) -> Result<()> {
    let path = keyfile_path(cfg, name)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let keyfile = Keyfile {
        address: account.address().to_string(),
        seed: hex::encode(seed),
    };
    fs::write(&path, serde_json::to_vec_pretty(&keyfile)?)?;
    Ok(())
}

/// Generate a fresh account, write its keyfile, and register it in the
/// wallet table. The caller is responsible for saving the configuration.
pub fn create_account(cfg: &mut Config, name: &str) -> Result<Account> {
    let mut seed = Zeroizing::new([0u8; 32]);
    rand::rngs::OsRng.fill_bytes(seed.as_mut());
    import_seed(cfg, name, seed.as_ref())
}

/// Import an account from a hex-encoded 32-byte ed25519 seed.
pub fn import_account(cfg: &mut Config, name: &str, seed_hex: &str) -> Result<Account> {
    let seed = Zeroizing::new(
        hex::decode(seed_hex.trim().trim_start_matches("0x"))
            .map_err(|_| Error::Wallet(format!("seed for '{name}' is not valid hex")))?,
    );
    import_seed(cfg, name, &seed)
}

fn import_seed(cfg: &mut Config, name: &str, seed: &[u8]) -> Result<Account> {
    if name.starts_with(TEST_ACCOUNT_PREFIX) {
        return Err(Error::Wallet(format!(
            "'{TEST_ACCOUNT_PREFIX}' names are reserved"
        )));
    }
    let account = account_from_seed(name, seed)?;
    cfg.wallet.add(
        name,
        AccountConfig {
            address: account.address().to_string(),
            description: String::new(),
        },
    )?;
    write_keyfile(cfg, name, &account, seed)?;
    Ok(account)
}

/// Remove an account's wallet entry and keyfile.
pub fn remove_account(cfg: &mut Config, name: &str) -> Result<()> {
    cfg.wallet.remove(name)?;
    let path = keyfile_path(cfg, name)?;
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Load an account for signing. Names under the `test:` namespace resolve
/// to the built-in test accounts and never touch the filesystem.
pub fn load_account(cfg: &Config, name: &str) -> Result<Account> {
    if let Some(bare) = name.strip_prefix(TEST_ACCOUNT_PREFIX) {
        return test_accounts::lookup(bare)
            .ok_or_else(|| Error::AccountNotFound(name.to_string()));
    }
    if !cfg.wallet.all.contains_key(name) {
        return Err(Error::AccountNotFound(name.to_string()));
    }
    let path = keyfile_path(cfg, name)?;
    let raw = fs::read(&path)
        .map_err(|_| Error::Wallet(format!("missing keyfile for account '{name}'")))?;
    let keyfile: Keyfile = serde_json::from_slice(&raw)?;
    let seed = Zeroizing::new(
        hex::decode(&keyfile.seed)
            .map_err(|_| Error::Wallet(format!("corrupt keyfile for account '{name}'")))?,
    );
    account_from_seed(name, &seed)
}

/// Address of a named account without loading key material.
pub fn account_address(cfg: &Config, name: &str) -> Result<Address> {
    if let Some(bare) = name.strip_prefix(TEST_ACCOUNT_PREFIX) {
        return test_accounts::lookup(bare)
            .map(|a| a.address())
            .ok_or_else(|| Error::AccountNotFound(name.to_string()));
    }
    match cfg.wallet.all.get(name) {
        Some(entry) => entry.address.parse(),
        None => Err(Error::AccountNotFound(name.to_string())),
    }
}

/// Resolves proposal address fields against the wallet.
///
/// Resolution order: reserved `test:` names, then wallet account names,
/// then literal address strings. Anything else is unresolvable.
pub struct WalletResolver<'a> {
    cfg: &'a Config,
}

impl<'a> WalletResolver<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self { cfg }
    }
}

impl AddressResolver for WalletResolver<'_> {
    fn resolve(&self, name_or_address: &str) -> Result<Address> {
        if let Some(bare) = name_or_address.strip_prefix(TEST_ACCOUNT_PREFIX) {
            return test_accounts::lookup(bare)
                .map(|a| a.address())
                .ok_or_else(|| Error::UnresolvableAddress(name_or_address.to_string()));
        }
        if let Some(entry) = self.cfg.wallet.all.get(name_or_address) {
            return entry
                .address
                .parse()
                .map_err(|_| Error::UnresolvableAddress(name_or_address.to_string()));
        }
        name_or_address.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(Some(dir.path().join("config.json"))).unwrap();
        (dir, cfg)
    }

    #[test]
    fn test_create_load_round_trip() {
        let (_dir, mut cfg) = temp_config();
        let created = create_account(&mut cfg, "validator").unwrap();
        let loaded = load_account(&cfg, "validator").unwrap();
        assert_eq!(created.address(), loaded.address());
        assert_eq!(cfg.wallet.default, "validator");
    }

    #[test]
    fn test_import_known_seed() {
        let (_dir, mut cfg) = temp_config();
        let seed_hex = hex::encode([9u8; 32]);
        let imported = import_account(&mut cfg, "ops", &seed_hex).unwrap();
        let expected = ed25519::Pair::from_seed_slice(&[9u8; 32]).unwrap();
        assert_eq!(imported.public_key_hex(), hex::encode(expected.public()));
    }

    #[test]
    fn test_reserved_prefix_rejected() {
        let (_dir, mut cfg) = temp_config();
        assert!(create_account(&mut cfg, "test:alice").is_err());
    }

    #[test]
    fn test_remove_deletes_keyfile() {
        let (_dir, mut cfg) = temp_config();
        create_account(&mut cfg, "ephemeral").unwrap();
        let path = keyfile_path(&cfg, "ephemeral").unwrap();
        assert!(path.exists());
        remove_account(&mut cfg, "ephemeral").unwrap();
        assert!(!path.exists());
        assert!(matches!(
            load_account(&cfg, "ephemeral"),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_resolver_precedence() {
        let (_dir, mut cfg) = temp_config();
        let created = create_account(&mut cfg, "treasury").unwrap();
        let resolver = WalletResolver::new(&cfg);

        // Wallet name.
        assert_eq!(resolver.resolve("treasury").unwrap(), created.address());
        // Reserved namespace.
        let alice = test_accounts::lookup("alice").unwrap().address();
        assert_eq!(resolver.resolve("test:alice").unwrap(), alice);
        // Literal address.
        assert_eq!(
            resolver.resolve(&alice.to_string()).unwrap(),
            alice
        );
        // Garbage.
        assert!(matches!(
            resolver.resolve("nobody-here"),
            Err(Error::UnresolvableAddress(_))
        ));
    }

    #[test]
    fn test_sign_verifies() {
        let account = test_accounts::lookup("alice").unwrap();
        let sig = account.sign(b"payload");
        assert!(ed25519::Pair::verify(
            &sig,
            b"payload",
            &ed25519::Pair::from_seed_slice(&{
                use sha2::{Digest, Sha256};
                let mut h = Sha256::new();
                h.update(b"hela/test-account/alice");
                let out: [u8; 32] = h.finalize().into();
                out
            })
            .unwrap()
            .public()
        ));
    }
}
