//! Governance proposals: payload shapes, the JSON codec, and per-action
//! field validation.
//!
//! A proposal input file is a JSON envelope `{"action": "<Name>", "data":
//! {...}}`. Every possible field across all actions is decoded into an
//! all-optional raw struct first; each action then asserts a closed
//! whitelist over it, so a field that is merely *present* for the wrong
//! action is an error rather than silently ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::types::action::Action;
use crate::types::address::{Address, AddressResolver};
use crate::types::role::Role;
use crate::types::token::{parse_denomination, BaseUnits, DenominationInfo};
use crate::types::vote::VoteOption;

/// Opaque metadata attached to mint/burn proposals, hex on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta(pub Vec<u8>);

impl Meta {
    /// Decode the user-facing string encoding: `0x`-prefixed hex, or raw
    /// UTF-8 bytes otherwise. A missing value is an empty metadata blob.
    pub fn from_string_encoding(input: Option<&str>) -> Result<Self> {
        match input {
            None => Ok(Meta::default()),
            Some(s) => {
                if let Some(h) = s.strip_prefix("0x") {
                    let bytes = hex::decode(h).map_err(|_| Error::InvalidProposalFields {
                        action: "Mint/Burn",
                        detail: "meta is not valid hex",
                    })?;
                    Ok(Meta(bytes))
                } else {
                    Ok(Meta(s.as_bytes().to_vec()))
                }
            }
        }
    }
}

impl Serialize for Meta {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for Meta {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map(Meta).map_err(serde::de::Error::custom)
    }
}

/// Quorum settings carried by a `Config` proposal; all percentages optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumUpdate {
    pub mint_quorum: Option<u8>,
    pub burn_quorum: Option<u8>,
    pub whitelist_quorum: Option<u8>,
    pub blacklist_quorum: Option<u8>,
    pub config_quorum: Option<u8>,
}

/// Validated proposal payload, one variant per action.
///
/// The sum type makes the "field present but should be absent" class of bug
/// unrepresentable once parsing has succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalData {
    NoAction,
    Mint {
        address: Address,
        amount: BaseUnits,
        meta: Meta,
    },
    Burn {
        address: Address,
        amount: BaseUnits,
        meta: Meta,
    },
    SetRoles {
        address: Address,
        role: Role,
    },
    Whitelist {
        address: Address,
    },
    Blacklist {
        address: Address,
    },
    Config(QuorumUpdate),
}

impl ProposalData {
    pub fn action(&self) -> Action {
        match self {
            ProposalData::NoAction => Action::NoAction,
            ProposalData::Mint { .. } => Action::Mint,
            ProposalData::Burn { .. } => Action::Burn,
            ProposalData::SetRoles { .. } => Action::SetRoles,
            ProposalData::Whitelist { .. } => Action::Whitelist,
            ProposalData::Blacklist { .. } => Action::Blacklist,
            ProposalData::Config(_) => Action::Config,
        }
    }
}

/// A proposal's action plus payload as submitted to (or read from) the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireProposalContent", try_from = "WireProposalContent")]
pub struct ProposalContent {
    pub data: ProposalData,
}

impl ProposalContent {
    pub fn new(data: ProposalData) -> Self {
        Self { data }
    }

    pub fn action(&self) -> Action {
        self.data.action()
    }

    /// Parse and validate a proposal input document.
    ///
    /// `resolver` turns account names or literal addresses into canonical
    /// addresses; `denom` is the paratime's native denomination used to
    /// scale mint/burn amounts.
    pub fn parse(
        raw_json: &[u8],
        resolver: &dyn AddressResolver,
        denom: &DenominationInfo,
    ) -> Result<Self> {
        let envelope: ProposalEnvelope = serde_json::from_slice(raw_json)?;
        let action = Action::from_str(&envelope.action)?;
        let raw: RawProposalData = serde_json::from_value(envelope.data)?;
        Self::validate(action, &raw)?;

        let data = match action {
            Action::Mint | Action::Burn => {
                let address = resolver.resolve(raw.address.as_deref().unwrap_or_default())?;
                let amount = parse_denomination(raw.amount.as_deref().unwrap_or_default(), denom)?;
                let meta = Meta::from_string_encoding(raw.meta.as_deref())?;
                if action == Action::Mint {
                    ProposalData::Mint {
                        address,
                        amount,
                        meta,
                    }
                } else {
                    ProposalData::Burn {
                        address,
                        amount,
                        meta,
                    }
                }
            }
            Action::SetRoles => {
                let address = resolver.resolve(raw.address.as_deref().unwrap_or_default())?;
                let role = Role::assignable_from_str(raw.role.as_deref().unwrap_or_default())?;
                ProposalData::SetRoles { address, role }
            }
            Action::Whitelist | Action::Blacklist => {
                let address = resolver.resolve(raw.address.as_deref().unwrap_or_default())?;
                if action == Action::Whitelist {
                    ProposalData::Whitelist { address }
                } else {
                    ProposalData::Blacklist { address }
                }
            }
            Action::Config => ProposalData::Config(QuorumUpdate {
                mint_quorum: raw.mint_quorum,
                burn_quorum: raw.burn_quorum,
                whitelist_quorum: raw.whitelist_quorum,
                blacklist_quorum: raw.blacklist_quorum,
                config_quorum: raw.config_quorum,
            }),
            // Rejected by Action::from_str above.
            Action::NoAction => unreachable!("NoAction is not a parseable action"),
        };

        Ok(ProposalContent::new(data))
    }

    /// Closed per-action whitelist over the raw payload: every field not in
    /// the action's legal subset must be absent, and every required field
    /// must be present. Runs before any address/amount resolution.
    fn validate(action: Action, raw: &RawProposalData) -> Result<()> {
        let name = action.name();
        let quorums_set = raw.mint_quorum.is_some()
            || raw.burn_quorum.is_some()
            || raw.whitelist_quorum.is_some()
            || raw.blacklist_quorum.is_some()
            || raw.config_quorum.is_some();

        let forbid = |present: bool, detail: &'static str| -> Result<()> {
            if present {
                Err(Error::InvalidProposalFields {
                    action: name,
                    detail,
                })
            } else {
                Ok(())
            }
        };
        let require = |present: bool, detail: &'static str| -> Result<()> {
            if present {
                Ok(())
            } else {
                Err(Error::InvalidProposalFields {
                    action: name,
                    detail,
                })
            }
        };

        match action {
            Action::Mint | Action::Burn => {
                forbid(raw.role.is_some(), "role must not be set")?;
                forbid(quorums_set, "quorum fields must not be set")?;
                require(raw.address.is_some(), "address is required")?;
                require(raw.amount.is_some(), "amount is required")?;
            }
            Action::SetRoles => {
                forbid(raw.amount.is_some(), "amount must not be set")?;
                forbid(raw.meta.is_some(), "meta must not be set")?;
                forbid(quorums_set, "quorum fields must not be set")?;
                require(raw.address.is_some(), "address is required")?;
                require(raw.role.is_some(), "role is required")?;
            }
            Action::Whitelist | Action::Blacklist => {
                forbid(raw.amount.is_some(), "amount must not be set")?;
                forbid(raw.meta.is_some(), "meta must not be set")?;
                forbid(raw.role.is_some(), "role must not be set")?;
                forbid(quorums_set, "quorum fields must not be set")?;
                require(raw.address.is_some(), "address is required")?;
            }
            Action::Config => {
                forbid(raw.address.is_some(), "address must not be set")?;
                forbid(raw.amount.is_some(), "amount must not be set")?;
                forbid(raw.meta.is_some(), "meta must not be set")?;
                forbid(raw.role.is_some(), "role must not be set")?;
            }
            Action::NoAction => {
                return Err(Error::UnknownAction(name.to_string()));
            }
        }
        Ok(())
    }

    /// Key/value pairs for display, in a stable order.
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        match &self.data {
            ProposalData::NoAction => vec![("Action", "NoAction".to_string())],
            ProposalData::Mint {
                address,
                amount,
                meta,
            }
            | ProposalData::Burn {
                address,
                amount,
                meta,
            } => {
                let mut fields = vec![
                    ("Action", self.action().to_string()),
                    ("Address", address.to_string()),
                    ("Amount", amount.to_string()),
                ];
                if !meta.0.is_empty() {
                    fields.push(("Meta", hex::encode(&meta.0)));
                }
                fields
            }
            ProposalData::SetRoles { address, role } => vec![
                ("Action", self.action().to_string()),
                ("Address", address.to_string()),
                ("Role", role.to_string()),
            ],
            ProposalData::Whitelist { address } | ProposalData::Blacklist { address } => vec![
                ("Action", self.action().to_string()),
                ("Address", address.to_string()),
            ],
            ProposalData::Config(q) => {
                let mut fields = vec![("Action", self.action().to_string())];
                let quorums: [(&'static str, Option<u8>); 5] = [
                    ("MintQuorum", q.mint_quorum),
                    ("BurnQuorum", q.burn_quorum),
                    ("WhitelistQuorum", q.whitelist_quorum),
                    ("BlacklistQuorum", q.blacklist_quorum),
                    ("ConfigQuorum", q.config_quorum),
                ];
                for (label, value) in quorums {
                    if let Some(v) = value {
                        fields.push((label, format!("{v}%")));
                    }
                }
                fields
            }
        }
    }
}

/// Raw input envelope; `data` stays opaque until the action is known.
#[derive(Debug, Deserialize)]
struct ProposalEnvelope {
    action: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Intermediate all-optional mirror of every field across all actions.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProposalData {
    address: Option<String>,
    amount: Option<String>,
    meta: Option<String>,
    role: Option<String>,
    mint_quorum: Option<u8>,
    burn_quorum: Option<u8>,
    whitelist_quorum: Option<u8>,
    blacklist_quorum: Option<u8>,
    config_quorum: Option<u8>,
}

/// Wire shape of proposal content: an action tag plus optional fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireProposalContent {
    action: Action,
    #[serde(default)]
    data: WireProposalData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireProposalData {
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<BaseUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mint_quorum: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    burn_quorum: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    whitelist_quorum: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blacklist_quorum: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config_quorum: Option<u8>,
}

impl From<ProposalContent> for WireProposalContent {
    fn from(content: ProposalContent) -> Self {
        let action = content.action();
        let mut data = WireProposalData::default();
        match content.data {
            ProposalData::NoAction => {}
            ProposalData::Mint {
                address,
                amount,
                meta,
            }
            | ProposalData::Burn {
                address,
                amount,
                meta,
            } => {
                data.address = Some(address);
                data.amount = Some(amount);
                data.meta = Some(meta);
            }
            ProposalData::SetRoles { address, role } => {
                data.address = Some(address);
                data.role = Some(role);
            }
            ProposalData::Whitelist { address } | ProposalData::Blacklist { address } => {
                data.address = Some(address);
            }
            ProposalData::Config(q) => {
                data.mint_quorum = q.mint_quorum;
                data.burn_quorum = q.burn_quorum;
                data.whitelist_quorum = q.whitelist_quorum;
                data.blacklist_quorum = q.blacklist_quorum;
                data.config_quorum = q.config_quorum;
            }
        }
        WireProposalContent { action, data }
    }
}

impl TryFrom<WireProposalContent> for ProposalContent {
    type Error = Error;

    fn try_from(wire: WireProposalContent) -> Result<Self> {
        let WireProposalData {
            address,
            amount,
            meta,
            role,
            mint_quorum,
            burn_quorum,
            whitelist_quorum,
            blacklist_quorum,
            config_quorum,
        } = wire.data;

        let missing = |detail: &'static str| Error::InvalidProposalFields {
            action: wire.action.name(),
            detail,
        };

        let data = match wire.action {
            Action::NoAction => ProposalData::NoAction,
            Action::Mint | Action::Burn => {
                let address = address.ok_or(missing("address is required"))?;
                let amount = amount.ok_or(missing("amount is required"))?;
                let meta = meta.unwrap_or_default();
                if wire.action == Action::Mint {
                    ProposalData::Mint {
                        address,
                        amount,
                        meta,
                    }
                } else {
                    ProposalData::Burn {
                        address,
                        amount,
                        meta,
                    }
                }
            }
            Action::SetRoles => ProposalData::SetRoles {
                address: address.ok_or(missing("address is required"))?,
                role: role.ok_or(missing("role is required"))?,
            },
            Action::Whitelist => ProposalData::Whitelist {
                address: address.ok_or(missing("address is required"))?,
            },
            Action::Blacklist => ProposalData::Blacklist {
                address: address.ok_or(missing("address is required"))?,
            },
            Action::Config => ProposalData::Config(QuorumUpdate {
                mint_quorum,
                burn_quorum,
                whitelist_quorum,
                blacklist_quorum,
                config_quorum,
            }),
        };
        Ok(ProposalContent::new(data))
    }
}

/// Lifecycle state of an on-chain proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    Active,
    Passed,
    Rejected,
    Expired,
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProposalState::Active => "Active",
            ProposalState::Passed => "Passed",
            ProposalState::Rejected => "Rejected",
            ProposalState::Expired => "Expired",
        };
        f.write_str(s)
    }
}

/// An on-chain proposal as reported by the runtime accounts module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u32,
    pub submitter: Address,
    pub state: ProposalState,
    pub content: ProposalContent,
    #[serde(default)]
    pub results: BTreeMap<VoteOption, u64>,
}

/// Parse a user-supplied proposal ID as a decimal u32.
pub fn parse_proposal_id(input: &str) -> Result<u32> {
    input
        .parse::<u32>()
        .map_err(|_| Error::InvalidProposalId(input.to_string()))
}

/// An address/role pair for owner initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAddress {
    pub addr: Address,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::crypto::AccountId32;

    struct StubResolver;

    impl AddressResolver for StubResolver {
        fn resolve(&self, name_or_address: &str) -> Result<Address> {
            match name_or_address {
                "alice" => Ok(Address::from_account_id(AccountId32::new([1u8; 32]))),
                "bob" => Ok(Address::from_account_id(AccountId32::new([2u8; 32]))),
                other => other.parse(),
            }
        }
    }

    fn denom() -> DenominationInfo {
        DenominationInfo::new("HLUSD", 9)
    }

    fn parse(json: &str) -> Result<ProposalContent> {
        ProposalContent::parse(json.as_bytes(), &StubResolver, &denom())
    }

    #[test]
    fn test_mint_proposal_parses() {
        let content = parse(
            r#"{"action":"Mint","data":{"address":"alice","amount":"100.5","meta":"m"}}"#,
        )
        .unwrap();
        match content.data {
            ProposalData::Mint { amount, meta, .. } => {
                assert_eq!(amount.amount, 100_500_000_000);
                assert_eq!(meta.0, b"m");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_mint_rejects_role_field() {
        let err = parse(
            r#"{"action":"Mint","data":{"address":"alice","amount":"1","role":"Admin"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidProposalFields { .. }));
    }

    #[test]
    fn test_set_roles_rejects_amount() {
        let err = parse(
            r#"{"action":"SetRoles","data":{"address":"alice","role":"Admin","amount":"1"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidProposalFields { .. }));
    }

    #[test]
    fn test_set_roles_rejects_meta() {
        let err = parse(
            r#"{"action":"SetRoles","data":{"address":"alice","role":"Admin","meta":"m"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidProposalFields { .. }));
    }

    #[test]
    fn test_config_rejects_role() {
        let err = parse(r#"{"action":"Config","data":{"mint_quorum":60,"role":"Admin"}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidProposalFields { .. }));
    }

    #[test]
    fn test_config_passes_quorums_through() {
        let content =
            parse(r#"{"action":"Config","data":{"mint_quorum":60,"config_quorum":80}}"#).unwrap();
        match content.data {
            ProposalData::Config(q) => {
                assert_eq!(q.mint_quorum, Some(60));
                assert_eq!(q.burn_quorum, None);
                assert_eq!(q.config_quorum, Some(80));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_whitelist_requires_address() {
        let err = parse(r#"{"action":"Whitelist","data":{}}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidProposalFields {
                detail: "address is required",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_action() {
        let err = parse(r#"{"action":"Teleport","data":{}}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownAction(_)));
    }

    #[test]
    fn test_unknown_role_in_set_roles() {
        let err =
            parse(r#"{"action":"SetRoles","data":{"address":"alice","role":"Emperor"}}"#)
                .unwrap_err();
        assert!(matches!(err, Error::UnknownRole(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(parse(r#"{"action":"Mint","data":{"address":"alice","amount":"1","frob":1}}"#)
            .is_err());
    }

    #[test]
    fn test_validation_runs_before_resolution() {
        // The address "nonexistent" would fail resolution, but the foreign
        // role field must be reported first.
        let err = parse(
            r#"{"action":"Whitelist","data":{"address":"nonexistent","role":"Admin"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidProposalFields { .. }));
    }

    #[test]
    fn test_wire_round_trip_set_roles() {
        let addr = Address::from_account_id(AccountId32::new([9u8; 32]));
        let content = ProposalContent::new(ProposalData::SetRoles {
            address: addr.clone(),
            role: Role::Admin,
        });
        let json = serde_json::to_string(&content).unwrap();
        let back: ProposalContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data, ProposalData::SetRoles { address: addr, role: Role::Admin });
    }

    #[test]
    fn test_parse_proposal_id() {
        assert_eq!(parse_proposal_id("42").unwrap(), 42);
        assert!(matches!(
            parse_proposal_id("abc"),
            Err(Error::InvalidProposalId(_))
        ));
        assert!(matches!(
            parse_proposal_id("-1"),
            Err(Error::InvalidProposalId(_))
        ));
    }

    #[test]
    fn test_display_fields_config() {
        let content = ProposalContent::new(ProposalData::Config(QuorumUpdate {
            mint_quorum: Some(60),
            ..Default::default()
        }));
        let fields = content.display_fields();
        assert!(fields.contains(&("MintQuorum", "60%".to_string())));
        assert!(!fields.iter().any(|(k, _)| *k == "BurnQuorum"));
    }
}
