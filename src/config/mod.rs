//! Persistent client configuration: networks, paratimes, and the wallet
//! account table.
//!
//! The configuration lives in a single JSON document (default
//! `~/.hela/config.json`). All mutation happens in memory; `save` writes the
//! whole document atomically via a temp file and rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::types::{DenominationInfo, NATIVE_DENOMINATION};

/// Directory name under the user's home directory.
const CONFIG_DIR: &str = ".hela";
/// Configuration file name inside the config directory.
const CONFIG_FILE: &str = "config.json";

/// A configured network endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// JSON-RPC endpoint URL.
    pub rpc: String,
    #[serde(default)]
    pub description: String,
    /// Consensus-layer denomination.
    pub denomination: DenominationInfo,
    #[serde(default)]
    pub paratimes: ParaTimes,
}

/// A configured paratime under some network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParaTime {
    /// Runtime identifier as registered on the consensus layer.
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Denominations by key; the native one is under [`NATIVE_DENOMINATION`].
    pub denominations: BTreeMap<String, DenominationInfo>,
}

impl ParaTime {
    /// The paratime's native denomination.
    ///
    /// Falls back to a zero-decimal unnamed denomination if the entry is
    /// missing, which only happens for hand-edited configurations.
    pub fn native_denomination(&self) -> DenominationInfo {
        self.denominations
            .get(NATIVE_DENOMINATION)
            .cloned()
            .unwrap_or_else(|| DenominationInfo::new("", 0))
    }
}

/// Paratime table for one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParaTimes {
    #[serde(default)]
    pub all: BTreeMap<String, ParaTime>,
    #[serde(default)]
    pub default: String,
}

impl ParaTimes {
    pub fn add(&mut self, name: &str, paratime: ParaTime) -> Result<()> {
        validate_identifier(name)?;
        if self.all.contains_key(name) {
            return Err(Error::Config(format!("paratime '{name}' already exists")));
        }
        if self.all.is_empty() {
            self.default = name.to_string();
        }
        self.all.insert(name.to_string(), paratime);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.all.remove(name).is_none() {
            return Err(Error::ParaTimeNotFound(name.to_string()));
        }
        if self.default == name {
            self.default.clear();
        }
        Ok(())
    }

    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.all.contains_key(name) {
            return Err(Error::ParaTimeNotFound(name.to_string()));
        }
        self.default = name.to_string();
        Ok(())
    }
}

/// Network table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub all: BTreeMap<String, Network>,
    #[serde(default)]
    pub default: String,
}

impl Networks {
    pub fn add(&mut self, name: &str, network: Network) -> Result<()> {
        validate_identifier(name)?;
        if self.all.contains_key(name) {
            return Err(Error::Config(format!("network '{name}' already exists")));
        }
        if self.all.is_empty() {
            self.default = name.to_string();
        }
        self.all.insert(name.to_string(), network);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.all.remove(name).is_none() {
            return Err(Error::NetworkNotFound(name.to_string()));
        }
        if self.default == name {
            self.default.clear();
        }
        Ok(())
    }

    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.all.contains_key(name) {
            return Err(Error::NetworkNotFound(name.to_string()));
        }
        self.default = name.to_string();
        Ok(())
    }
}

/// A wallet account entry. Key material lives in a separate keyfile under
/// the config directory; only the public address is recorded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// Wallet account table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletStore {
    #[serde(default)]
    pub all: BTreeMap<String, AccountConfig>,
    #[serde(default)]
    pub default: String,
}

impl WalletStore {
    pub fn add(&mut self, name: &str, account: AccountConfig) -> Result<()> {
        validate_identifier(name)?;
        if self.all.contains_key(name) {
            return Err(Error::Config(format!("account '{name}' already exists")));
        }
        if self.all.is_empty() {
            self.default = name.to_string();
        }
        self.all.insert(name.to_string(), account);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.all.remove(name).is_none() {
            return Err(Error::AccountNotFound(name.to_string()));
        }
        if self.default == name {
            self.default.clear();
        }
        Ok(())
    }

    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.all.contains_key(name) {
            return Err(Error::AccountNotFound(name.to_string()));
        }
        self.default = name.to_string();
        Ok(())
    }
}

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub networks: Networks,
    #[serde(default)]
    pub wallet: WalletStore,
    #[serde(skip)]
    pub(crate) path: Option<PathBuf>,
}

impl Config {
    /// Default configuration file location.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from the given path, or the default location. A missing file
    /// yields an empty configuration bound to that path.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => Self::default_path()?,
        };
        let mut cfg: Config = if path.exists() {
            let raw = fs::read(&path)?;
            serde_json::from_slice(&raw)?
        } else {
            Config::default()
        };
        cfg.path = Some(path);
        Ok(cfg)
    }

    /// Directory holding the configuration file and keyfiles.
    pub fn dir(&self) -> Result<PathBuf> {
        let path = match &self.path {
            Some(p) => p.clone(),
            None => Self::default_path()?,
        };
        Ok(path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Persist the whole document atomically.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(p) => p.clone(),
            None => Self::default_path()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Validate a user-chosen name for networks, paratimes, and accounts.
pub fn validate_identifier(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(Error::Config(format!("invalid identifier '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_network() -> Network {
        Network {
            rpc: "http://localhost:8545".to_string(),
            description: String::new(),
            denomination: DenominationInfo::new("HELA", 18),
            paratimes: ParaTimes::default(),
        }
    }

    fn sample_paratime() -> ParaTime {
        let mut denominations = BTreeMap::new();
        denominations.insert(
            NATIVE_DENOMINATION.to_string(),
            DenominationInfo::new("HLUSD", 9),
        );
        ParaTime {
            id: "000000000000000000000000000000000000000000000000000000000000beef".to_string(),
            description: String::new(),
            denominations,
        }
    }

    #[test]
    fn test_first_entry_becomes_default() {
        let mut networks = Networks::default();
        networks.add("testnet", sample_network()).unwrap();
        assert_eq!(networks.default, "testnet");
        networks.add("mainnet", sample_network()).unwrap();
        assert_eq!(networks.default, "testnet");
    }

    #[test]
    fn test_duplicate_add_fails() {
        let mut networks = Networks::default();
        networks.add("testnet", sample_network()).unwrap();
        assert!(networks.add("testnet", sample_network()).is_err());
    }

    #[test]
    fn test_remove_clears_default() {
        let mut paratimes = ParaTimes::default();
        paratimes.add("stablenet", sample_paratime()).unwrap();
        paratimes.remove("stablenet").unwrap();
        assert!(paratimes.default.is_empty());
        assert!(matches!(
            paratimes.remove("stablenet"),
            Err(Error::ParaTimeNotFound(_))
        ));
    }

    #[test]
    fn test_set_default_requires_existing() {
        let mut wallet = WalletStore::default();
        assert!(matches!(
            wallet.set_default("ghost"),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("my-net_1").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("bad name").is_err());
        assert!(validate_identifier("sneaky/../path").is_err());
    }

    #[test]
    fn test_native_denomination_lookup() {
        let pt = sample_paratime();
        assert_eq!(pt.native_denomination().symbol, "HLUSD");
        assert_eq!(pt.native_denomination().decimals, 9);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let mut cfg = Config::load(Some(path.clone())).unwrap();
        cfg.networks.add("testnet", sample_network()).unwrap();
        cfg.networks
            .all
            .get_mut("testnet")
            .unwrap()
            .paratimes
            .add("stablenet", sample_paratime())
            .unwrap();
        cfg.save().unwrap();

        let reloaded = Config::load(Some(path)).unwrap();
        assert_eq!(reloaded.networks, cfg.networks);
        assert_eq!(
            reloaded.networks.all["testnet"].paratimes.default,
            "stablenet"
        );
    }
}
