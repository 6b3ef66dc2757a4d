//! Consensus height to runtime round resolution.

use crate::chain::ConsensusClient;
use crate::errors::Result;

/// Sentinel consensus height meaning "latest".
pub const HEIGHT_LATEST: i64 = 0;

/// Sentinel runtime round meaning "latest". Runtime queries treat this as
/// the newest committed round.
pub const ROUND_LATEST: u64 = u64::MAX;

/// Resolve a consensus height to the runtime round to query at.
///
/// [`HEIGHT_LATEST`] maps straight to [`ROUND_LATEST`] without touching the
/// network. Any explicit height costs exactly one lookup of the runtime
/// block committed at that height.
pub async fn resolve_round(
    consensus: &ConsensusClient,
    runtime_id: &str,
    height: i64,
) -> Result<u64> {
    if height == HEIGHT_LATEST {
        return Ok(ROUND_LATEST);
    }
    consensus.runtime_round_at(runtime_id, height).await
}
