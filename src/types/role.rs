//! Governance roles for the stablecoin module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Role an address can hold in the stablecoin-governance module.
///
/// `User` is the wire value for addresses holding no governance role; it is
/// never assignable through `initowners` or a `SetRoles` proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    MintProposer,
    MintVoter,
    BurnProposer,
    BurnVoter,
    WhitelistProposer,
    WhitelistVoter,
    BlacklistProposer,
    BlacklistVoter,
    ConfigProposer,
    ConfigVoter,
    User,
}

impl Role {
    /// The closed set of roles that can be assigned to an address.
    ///
    /// Enumeration commands iterate this slice rather than relying on any
    /// ordering of the enum itself.
    pub const ASSIGNABLE: &'static [Role] = &[
        Role::Admin,
        Role::MintProposer,
        Role::MintVoter,
        Role::BurnProposer,
        Role::BurnVoter,
        Role::WhitelistProposer,
        Role::WhitelistVoter,
        Role::BlacklistProposer,
        Role::BlacklistVoter,
        Role::ConfigProposer,
        Role::ConfigVoter,
    ];

    /// Parse a role name for an assignment context.
    ///
    /// `User` parses as a wire value but is a sentinel, never a role an
    /// address can be given.
    pub fn assignable_from_str(s: &str) -> crate::errors::Result<Role> {
        let role: Role = s.parse()?;
        if Role::ASSIGNABLE.contains(&role) {
            Ok(role)
        } else {
            Err(Error::UnknownRole(s.to_string()))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::MintProposer => "MintProposer",
            Role::MintVoter => "MintVoter",
            Role::BurnProposer => "BurnProposer",
            Role::BurnVoter => "BurnVoter",
            Role::WhitelistProposer => "WhitelistProposer",
            Role::WhitelistVoter => "WhitelistVoter",
            Role::BlacklistProposer => "BlacklistProposer",
            Role::BlacklistVoter => "BlacklistVoter",
            Role::ConfigProposer => "ConfigProposer",
            Role::ConfigVoter => "ConfigVoter",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "mintproposer" => Ok(Role::MintProposer),
            "mintvoter" => Ok(Role::MintVoter),
            "burnproposer" => Ok(Role::BurnProposer),
            "burnvoter" => Ok(Role::BurnVoter),
            "whitelistproposer" => Ok(Role::WhitelistProposer),
            "whitelistvoter" => Ok(Role::WhitelistVoter),
            "blacklistproposer" => Ok(Role::BlacklistProposer),
            "blacklistvoter" => Ok(Role::BlacklistVoter),
            "configproposer" => Ok(Role::ConfigProposer),
            "configvoter" => Ok(Role::ConfigVoter),
            "user" => Ok(Role::User),
            _ => Err(Error::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("mintvoter".parse::<Role>().unwrap(), Role::MintVoter);
        assert!(matches!(
            "Overlord".parse::<Role>(),
            Err(Error::UnknownRole(_))
        ));
    }

    #[test]
    fn test_assignable_excludes_user() {
        assert!(!Role::ASSIGNABLE.contains(&Role::User));
        assert_eq!(Role::ASSIGNABLE[0], Role::Admin);
        assert_eq!(Role::ASSIGNABLE.len(), 11);
    }

    #[test]
    fn test_user_sentinel_is_not_assignable() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!(matches!(
            Role::assignable_from_str("user"),
            Err(Error::UnknownRole(_))
        ));
        assert!(matches!(
            Role::assignable_from_str("User"),
            Err(Error::UnknownRole(_))
        ));
        assert_eq!(Role::assignable_from_str("Admin").unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_round_trip_names() {
        for role in Role::ASSIGNABLE {
            assert_eq!(role.name().parse::<Role>().unwrap(), *role);
        }
    }
}
