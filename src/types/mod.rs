//! Domain types for the HELA client: addresses, roles, actions, token
//! amounts, and governance proposals.

pub mod action;
pub mod address;
pub mod proposal;
pub mod role;
pub mod token;
pub mod vote;

pub use action::Action;
pub use address::{Address, AddressResolver, HELA_SS58_FORMAT};
pub use proposal::{
    parse_proposal_id, Meta, Proposal, ProposalContent, ProposalData, ProposalState, QuorumUpdate,
    RoleAddress,
};
pub use role::Role;
pub use token::{parse_denomination, BaseUnits, DenominationInfo, NATIVE_DENOMINATION};
pub use vote::{VoteOption, VoteProposal};
