use std::cmp::Reverse;

use shared::types::ChainRecord;

/// Deterministic total order for the non-searched list: chains with more
/// enabled services rank first, ties break on ascending chain id.
pub fn sort(mut chains: Vec<&ChainRecord>) -> Vec<&ChainRecord> {
    chains.sort_by_cached_key(|chain| (Reverse(chain.enabled_service_count()), chain.chain_id));
    chains
}
