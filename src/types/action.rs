//! Governance actions recognized by the stablecoin module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Action carried by a governance proposal.
///
/// `NoAction` is what the runtime reports for an empty proposal slot; it is
/// never a valid action for a new proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    NoAction,
    Mint,
    Burn,
    SetRoles,
    Whitelist,
    Blacklist,
    Config,
}

impl Action {
    /// The explicit set of actions that carry a voting quorum.
    ///
    /// Kept as a closed list so quorum enumeration never depends on the
    /// declaration order of the enum.
    pub const QUORUM_BEARING: &'static [Action] = &[
        Action::Mint,
        Action::Burn,
        Action::SetRoles,
        Action::Whitelist,
        Action::Blacklist,
        Action::Config,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::NoAction => "NoAction",
            Action::Mint => "Mint",
            Action::Burn => "Burn",
            Action::SetRoles => "SetRoles",
            Action::Whitelist => "Whitelist",
            Action::Blacklist => "Blacklist",
            Action::Config => "Config",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mint" => Ok(Action::Mint),
            "burn" => Ok(Action::Burn),
            "setroles" => Ok(Action::SetRoles),
            "whitelist" => Ok(Action::Whitelist),
            "blacklist" => Ok(Action::Blacklist),
            "config" => Ok(Action::Config),
            _ => Err(Error::UnknownAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str() {
        assert_eq!("Mint".parse::<Action>().unwrap(), Action::Mint);
        assert_eq!("setroles".parse::<Action>().unwrap(), Action::SetRoles);
        assert!(matches!(
            "Teleport".parse::<Action>(),
            Err(Error::UnknownAction(_))
        ));
    }

    #[test]
    fn test_no_action_not_parseable() {
        // NoAction is a wire-only value, not valid proposal input.
        assert!("NoAction".parse::<Action>().is_err());
    }

    #[test]
    fn test_quorum_bearing_set() {
        assert!(!Action::QUORUM_BEARING.contains(&Action::NoAction));
        assert_eq!(Action::QUORUM_BEARING.len(), 6);
    }
}
