//! Vote options and per-invocation vote payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Vote option for a governance proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    No,
    Abstain,
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VoteOption::Yes => "Yes",
            VoteOption::No => "No",
            VoteOption::Abstain => "Abstain",
        };
        f.write_str(s)
    }
}

impl FromStr for VoteOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(VoteOption::Yes),
            "no" => Ok(VoteOption::No),
            "abstain" => Ok(VoteOption::Abstain),
            _ => Err(Error::UnknownVoteOption(s.to_string())),
        }
    }
}

/// Ephemeral vote payload, constructed per `vote` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteProposal {
    pub id: u32,
    pub option: VoteOption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_option_parsing() {
        assert_eq!("YES".parse::<VoteOption>().unwrap(), VoteOption::Yes);
        assert_eq!("abstain".parse::<VoteOption>().unwrap(), VoteOption::Abstain);
        assert!(matches!(
            "maybe".parse::<VoteOption>(),
            Err(Error::UnknownVoteOption(_))
        ));
    }
}
