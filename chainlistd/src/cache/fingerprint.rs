use serde::Serialize;
use sha2::{Digest, Sha256};
use shared::types::{ChainRecord, ChainStatus, NativeCurrency, ServiceAnnotation};

/// Fingerprint only stable fields — icon URLs rotate with the upstream CDN
/// and don't represent catalog changes.
#[derive(Serialize)]
struct FingerprintView<'a> {
    chain_id: u64,
    name: &'a str,
    slug: &'a str,
    testnet: bool,
    status: ChainStatus,
    native_currency: &'a NativeCurrency,
    services: &'a [ServiceAnnotation],
}

/// Computes a SHA-256 hash of the catalog.
/// Records are sorted by chain id for deterministic output.
pub fn compute_fingerprint(chains: &[ChainRecord]) -> String {
    let mut indices: Vec<usize> = (0..chains.len()).collect();
    indices.sort_by_key(|&i| chains[i].chain_id);

    let views: Vec<FingerprintView<'_>> = indices
        .iter()
        .map(|&i| {
            let chain = &chains[i];
            FingerprintView {
                chain_id: chain.chain_id,
                name: &chain.name,
                slug: &chain.slug,
                testnet: chain.testnet,
                status: chain.status,
                native_currency: &chain.native_currency,
                services: &chain.services,
            }
        })
        .collect();

    let json = serde_json::to_string(&views).expect("Failed to serialize catalog for hashing");

    let hash = Sha256::digest(json.as_bytes());
    hex::encode(hash)
}
