use shared::types::ChainRecord;

use super::PAGE_SIZE;

/// Maximum distance a match may score; lower is stricter
pub const SEARCH_THRESHOLD: f64 = 0.2;

const NAME_WEIGHT: f64 = 2.0;
const CHAIN_ID_WEIGHT: f64 = 1.0;

/// Fuzzy-match the candidates against the query and rank them by relevance.
/// Results are capped at one page; matches past the cap are not reachable
/// through pagination. That cap is intentional.
pub fn search<'a>(chains: Vec<&'a ChainRecord>, query: &str) -> Vec<&'a ChainRecord> {
    let mut scored: Vec<(f64, &ChainRecord)> = chains
        .into_iter()
        .filter_map(|chain| {
            let score = score(chain, query);
            (score <= SEARCH_THRESHOLD).then_some((score, chain))
        })
        .collect();

    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.chain_id.cmp(&b.1.chain_id)));
    scored.truncate(PAGE_SIZE);

    scored.into_iter().map(|(_, chain)| chain).collect()
}

/// Best weighted field distance: the name counts double relative to the
/// chain id rendered as text.
fn score(chain: &ChainRecord, query: &str) -> f64 {
    let name = field_distance(query, &chain.name) / NAME_WEIGHT;
    let id = field_distance(query, &chain.chain_id.to_string()) / CHAIN_ID_WEIGHT;
    name.min(id)
}

/// Distance in [0, 1]. Exact, prefix and substring hits rank ahead of pure
/// edit-distance similarity; everything else scores by error rate.
fn field_distance(query: &str, field: &str) -> f64 {
    let query = query.to_lowercase();
    let field = field.to_lowercase();
    if query.is_empty() || field.is_empty() {
        return 1.0;
    }
    if field == query {
        0.0
    } else if field.starts_with(&query) {
        0.05
    } else if field.contains(&query) {
        0.1
    } else {
        1.0 - strsim::normalized_levenshtein(&query, &field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::{ChainStatus, NativeCurrency};

    fn chain(chain_id: u64, name: &str) -> ChainRecord {
        ChainRecord {
            chain_id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            testnet: false,
            status: ChainStatus::Active,
            native_currency: NativeCurrency {
                name: "Ether".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            icon: None,
            services: Vec::new(),
        }
    }

    fn ids(chains: &[&ChainRecord]) -> Vec<u64> {
        chains.iter().map(|c| c.chain_id).collect()
    }

    #[test]
    fn test_exact_name_match_ranks_first() {
        let polygon = chain(137, "Polygon");
        let zkevm = chain(1101, "Polygon zkEVM");
        let ethereum = chain(1, "Ethereum Mainnet");
        let candidates = vec![&ethereum, &zkevm, &polygon];

        let results = search(candidates, "polygon");
        assert_eq!(ids(&results), vec![137, 1101]);
    }

    #[test]
    fn test_chain_id_text_matches() {
        let polygon = chain(137, "Polygon");
        let ethereum = chain(1, "Ethereum Mainnet");

        let results = search(vec![&ethereum, &polygon], "137");
        assert_eq!(ids(&results), vec![137]);
    }

    #[test]
    fn test_matches_across_both_fields() {
        // "10" is one chain's id and another's name prefix; both match,
        // and the exact id hit outranks the weighted prefix hit
        let optimism = chain(10, "Optimism");
        let tens = chain(4000, "10x Chain");

        let results = search(vec![&tens, &optimism], "10");
        assert_eq!(ids(&results), vec![10, 4000]);
    }

    #[test]
    fn test_unrelated_names_fall_outside_threshold() {
        let avalanche = chain(43114, "Avalanche");
        let results = search(vec![&avalanche], "polygon");
        assert!(results.is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let polygon = chain(137, "Polygon");
        let results = search(vec![&polygon], "POLYGON");
        assert_eq!(ids(&results), vec![137]);
    }

    #[test]
    fn test_results_cap_at_one_page() {
        let chains: Vec<ChainRecord> = (1..=30)
            .map(|id| chain(id, &format!("Testchain {}", id)))
            .collect();

        let results = search(chains.iter().collect(), "testchain");
        assert_eq!(results.len(), PAGE_SIZE);
        // deterministic rank: equal scores fall back to ascending chain id
        assert_eq!(results[0].chain_id, 1);
    }

    #[test]
    fn test_misspelled_query_still_matches() {
        let polygon = chain(137, "Polygon");
        let ethereum = chain(1, "Ethereum Mainnet");

        let results = search(vec![&ethereum, &polygon], "polygonn");
        assert_eq!(ids(&results), vec![137]);
    }
}
