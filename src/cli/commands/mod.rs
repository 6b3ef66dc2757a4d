//! CLI command implementations.

pub mod managest;
pub mod network;
pub mod paratime;
pub mod wallet;
