//! Account addresses and address resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};

use crate::errors::{Error, Result};

/// SS58 address format registered for the HELA network.
pub const HELA_SS58_FORMAT: u16 = 42;

/// A canonical on-chain account address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(AccountId32);

impl Address {
    pub fn from_account_id(id: AccountId32) -> Self {
        Address(id)
    }

    /// Derive the address from a raw ed25519 public key.
    pub fn from_public_key(public: &sp_core::ed25519::Public) -> Self {
        Address(AccountId32::from(*public))
    }

    pub fn account_id(&self) -> &AccountId32 {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            &self
                .0
                .to_ss58check_with_version(Ss58AddressFormat::custom(HELA_SS58_FORMAT)),
        )
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AccountId32::from_ss58check(s)
            .map(Address)
            .map_err(|_| Error::UnresolvableAddress(s.to_string()))
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Resolves a local account name, reserved test-account name, or literal
/// address string into a canonical [`Address`].
///
/// The concrete resolver lives in the wallet module; proposal parsing only
/// depends on this seam so it can be exercised without wallet storage.
pub trait AddressResolver {
    fn resolve(&self, name_or_address: &str) -> Result<Address>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_round_trip() {
        let id = AccountId32::new([7u8; 32]);
        let addr = Address::from_account_id(id);
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_invalid_address_string() {
        assert!(matches!(
            "not-an-address".parse::<Address>(),
            Err(Error::UnresolvableAddress(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let addr = Address::from_account_id(AccountId32::new([1u8; 32]));
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
