use std::sync::Arc;
use chrono::{DateTime, Utc};
use shared::types::ChainRecord;

use crate::cache::fingerprint;

/// One immutable view of the catalog. Handlers hold a clone for the length
/// of a request; the records themselves are never mutated in place.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub chains: Arc<Vec<ChainRecord>>,
    pub fetched_at: DateTime<Utc>,
    pub fingerprint: String,
}

impl CatalogSnapshot {
    pub fn new(chains: Vec<ChainRecord>, fetched_at: DateTime<Utc>) -> Self {
        let fingerprint = fingerprint::compute_fingerprint(&chains);
        Self {
            chains: Arc::new(chains),
            fetched_at,
            fingerprint,
        }
    }

    /// Whether this snapshot has aged past the cache window
    pub fn is_stale(&self, ttl_secs: u64, now: DateTime<Utc>) -> bool {
        now - self.fetched_at >= chrono::Duration::seconds(ttl_secs as i64)
    }
}
