//! Network/paratime/account selection.
//!
//! Every command resolves its working context once, up front, from the
//! persisted configuration plus the explicit selector flags. Explicit flags
//! always win over configured defaults; `--no-paratime` wins over both.

use crate::config::{Config, Network, ParaTime};
use crate::errors::{Error, Result};
use crate::types::Address;
use crate::wallet::{self, TEST_ACCOUNT_PREFIX};

/// Selector flags shared by all commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorFlags {
    pub network: Option<String>,
    pub paratime: Option<String>,
    pub no_paratime: bool,
    pub account: Option<String>,
}

/// A resolved account selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedAccount {
    pub name: String,
    pub address: Address,
}

/// The fully resolved working context.
#[derive(Debug, Clone, PartialEq)]
pub struct NpaSelection {
    pub network_name: String,
    pub network: Network,
    pub paratime_name: Option<String>,
    pub paratime: Option<ParaTime>,
    pub account: Option<SelectedAccount>,
}

impl NpaSelection {
    /// The selected paratime, or the error commands raise when they need
    /// one and none is selected.
    pub fn paratime(&self) -> Result<&ParaTime> {
        self.paratime.as_ref().ok_or(Error::NoParaTimeConfigured)
    }

    /// The selected account, or the error commands raise when they need
    /// one and none is selected.
    pub fn account(&self) -> Result<&SelectedAccount> {
        self.account.as_ref().ok_or(Error::NoAccountConfigured)
    }
}

/// Resolve the selector flags against the configuration.
///
/// Network resolution is mandatory and fails when nothing is configured.
/// Paratime and account resolution yield `None` when neither a flag nor a
/// default names one; commands that require them raise their own errors.
pub fn resolve(cfg: &Config, flags: &SelectorFlags) -> Result<NpaSelection> {
    if cfg.networks.all.is_empty() {
        return Err(Error::NoNetworksConfigured);
    }

    let network_name = flags
        .network
        .clone()
        .unwrap_or_else(|| cfg.networks.default.clone());
    let network = cfg
        .networks
        .all
        .get(&network_name)
        .cloned()
        .ok_or_else(|| Error::NetworkNotFound(network_name.clone()))?;

    let (paratime_name, paratime) = if flags.no_paratime {
        (None, None)
    } else {
        let name = flags
            .paratime
            .clone()
            .unwrap_or_else(|| network.paratimes.default.clone());
        if name.is_empty() {
            (None, None)
        } else {
            let pt = network
                .paratimes
                .all
                .get(&name)
                .cloned()
                .ok_or_else(|| Error::ParaTimeNotFound(name.clone()))?;
            (Some(name), Some(pt))
        }
    };

    let account_name = flags
        .account
        .clone()
        .unwrap_or_else(|| cfg.wallet.default.clone());
    let account = if account_name.is_empty() {
        None
    } else {
        Some(SelectedAccount {
            address: resolve_account_address(cfg, &account_name)?,
            name: account_name,
        })
    };

    Ok(NpaSelection {
        network_name,
        network,
        paratime_name,
        paratime,
        account,
    })
}

fn resolve_account_address(cfg: &Config, name: &str) -> Result<Address> {
    if name.starts_with(TEST_ACCOUNT_PREFIX) || cfg.wallet.all.contains_key(name) {
        wallet::account_address(cfg, name)
    } else {
        Err(Error::AccountNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountConfig, Networks};
    use crate::types::{DenominationInfo, NATIVE_DENOMINATION};
    use std::collections::BTreeMap;

    fn sample_config() -> Config {
        let mut cfg = Config::default();
        let mut denominations = BTreeMap::new();
        denominations.insert(
            NATIVE_DENOMINATION.to_string(),
            DenominationInfo::new("HLUSD", 9),
        );
        let mut network = Network {
            rpc: "http://localhost:8545".to_string(),
            description: String::new(),
            denomination: DenominationInfo::new("HELA", 18),
            paratimes: Default::default(),
        };
        network
            .paratimes
            .add(
                "stablenet",
                ParaTime {
                    id: "beef".to_string(),
                    description: String::new(),
                    denominations,
                },
            )
            .unwrap();
        cfg.networks.add("testnet", network.clone()).unwrap();
        network.paratimes = Default::default();
        cfg.networks.add("devnet", network).unwrap();

        let alice = crate::wallet::test_accounts::lookup("alice").unwrap();
        cfg.wallet
            .add(
                "mine",
                AccountConfig {
                    address: alice.address().to_string(),
                    description: String::new(),
                },
            )
            .unwrap();
        cfg
    }

    #[test]
    fn test_defaults_win_when_no_flags() {
        let cfg = sample_config();
        let sel = resolve(&cfg, &SelectorFlags::default()).unwrap();
        assert_eq!(sel.network_name, "testnet");
        assert_eq!(sel.paratime_name.as_deref(), Some("stablenet"));
        assert_eq!(sel.account.as_ref().unwrap().name, "mine");
    }

    #[test]
    fn test_explicit_flags_override_defaults() {
        let cfg = sample_config();
        let flags = SelectorFlags {
            network: Some("devnet".to_string()),
            account: Some("test:bob".to_string()),
            ..Default::default()
        };
        let sel = resolve(&cfg, &flags).unwrap();
        assert_eq!(sel.network_name, "devnet");
        // devnet has no paratimes configured.
        assert!(sel.paratime.is_none());
        assert_eq!(sel.account.as_ref().unwrap().name, "test:bob");
    }

    #[test]
    fn test_no_paratime_wins_over_flag() {
        let cfg = sample_config();
        let flags = SelectorFlags {
            paratime: Some("stablenet".to_string()),
            no_paratime: true,
            ..Default::default()
        };
        let sel = resolve(&cfg, &flags).unwrap();
        assert!(sel.paratime.is_none());
        assert!(matches!(
            sel.paratime(),
            Err(Error::NoParaTimeConfigured)
        ));
    }

    #[test]
    fn test_empty_config_fails() {
        let cfg = Config {
            networks: Networks::default(),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&cfg, &SelectorFlags::default()),
            Err(Error::NoNetworksConfigured)
        ));
    }

    #[test]
    fn test_unknown_names_fail() {
        let cfg = sample_config();
        let flags = SelectorFlags {
            network: Some("ghost".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&cfg, &flags),
            Err(Error::NetworkNotFound(_))
        ));

        let flags = SelectorFlags {
            paratime: Some("ghost".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&cfg, &flags),
            Err(Error::ParaTimeNotFound(_))
        ));

        let flags = SelectorFlags {
            account: Some("ghost".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&cfg, &flags),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let cfg = sample_config();
        let first = resolve(&cfg, &SelectorFlags::default()).unwrap();
        let flags = SelectorFlags {
            network: Some(first.network_name.clone()),
            paratime: first.paratime_name.clone(),
            no_paratime: first.paratime.is_none(),
            account: first.account.as_ref().map(|a| a.name.clone()),
        };
        let second = resolve(&cfg, &flags).unwrap();
        assert_eq!(first, second);
    }
}
