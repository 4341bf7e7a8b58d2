use shared::types::{ChainRecord, ChainStatus};

use crate::query::{ListParams, NetworkType};

/// Single pass over the catalog, preserving input order. Every predicate
/// must pass for a record to survive; an empty result is a valid outcome.
pub fn filter<'a>(chains: &'a [ChainRecord], params: &ListParams) -> Vec<&'a ChainRecord> {
    chains.iter().filter(|chain| passes(chain, params)).collect()
}

fn passes(chain: &ChainRecord, params: &ListParams) -> bool {
    if !params.include_deprecated && chain.status == ChainStatus::Deprecated {
        return false;
    }

    match params.network {
        Some(NetworkType::Testnet) if !chain.testnet => return false,
        Some(NetworkType::Mainnet) if chain.testnet => return false,
        _ => {}
    }

    // every requested service kind must be enabled on the chain
    params.services.iter().all(|kind| chain.has_service(*kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::{ChainService, NativeCurrency, ServiceAnnotation};

    fn chain(chain_id: u64, testnet: bool, services: Vec<(ChainService, bool)>) -> ChainRecord {
        ChainRecord {
            chain_id,
            name: format!("Chain {}", chain_id),
            slug: format!("chain-{}", chain_id),
            testnet,
            status: ChainStatus::Active,
            native_currency: NativeCurrency {
                name: "Ether".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            icon: None,
            services: services
                .into_iter()
                .map(|(service, enabled)| ServiceAnnotation { service, enabled })
                .collect(),
        }
    }

    fn ids(chains: &[&ChainRecord]) -> Vec<u64> {
        chains.iter().map(|c| c.chain_id).collect()
    }

    #[test]
    fn test_testnet_filter() {
        let chains = vec![
            chain(1, false, Vec::new()),
            chain(2, true, Vec::new()),
            chain(5, false, Vec::new()),
        ];

        let params = ListParams {
            network: Some(NetworkType::Testnet),
            ..ListParams::default()
        };
        assert_eq!(ids(&filter(&chains, &params)), vec![2]);

        let params = ListParams {
            network: Some(NetworkType::Mainnet),
            ..ListParams::default()
        };
        assert_eq!(ids(&filter(&chains, &params)), vec![1, 5]);
    }

    #[test]
    fn test_deprecated_hidden_by_default() {
        let mut dead = chain(2, false, Vec::new());
        dead.status = ChainStatus::Deprecated;
        let chains = vec![chain(1, false, Vec::new()), dead];

        assert_eq!(ids(&filter(&chains, &ListParams::default())), vec![1]);

        let params = ListParams {
            include_deprecated: true,
            ..ListParams::default()
        };
        assert_eq!(ids(&filter(&chains, &params)), vec![1, 2]);
    }

    #[test]
    fn test_service_filter_requires_all_enabled() {
        // pay enabled but engine disabled: excluded under AND semantics
        let chains = vec![
            chain(
                1,
                false,
                vec![(ChainService::Pay, true), (ChainService::Engine, false)],
            ),
            chain(
                2,
                false,
                vec![(ChainService::Pay, true), (ChainService::Engine, true)],
            ),
        ];

        let params = ListParams {
            services: vec![ChainService::Pay, ChainService::Engine],
            ..ListParams::default()
        };
        assert_eq!(ids(&filter(&chains, &params)), vec![2]);
    }

    #[test]
    fn test_disabled_annotation_does_not_count() {
        let chains = vec![chain(1, false, vec![(ChainService::Pay, false)])];

        let params = ListParams {
            services: vec![ChainService::Pay],
            ..ListParams::default()
        };
        assert!(filter(&chains, &params).is_empty());
    }

    #[test]
    fn test_filter_idempotent() {
        let mut dead = chain(3, true, Vec::new());
        dead.status = ChainStatus::Deprecated;
        let chains = vec![
            chain(1, false, vec![(ChainService::Contracts, true)]),
            chain(2, true, Vec::new()),
            dead,
        ];

        let params = ListParams {
            network: Some(NetworkType::Mainnet),
            ..ListParams::default()
        };

        let once = filter(&chains, &params);
        let once_owned: Vec<ChainRecord> = once.iter().map(|c| (*c).clone()).collect();
        let twice = filter(&once_owned, &params);

        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_predicates_compose_in_any_order() {
        let mut dead = chain(4, true, vec![(ChainService::Pay, true)]);
        dead.status = ChainStatus::Deprecated;
        let chains = vec![
            chain(1, false, vec![(ChainService::Pay, true)]),
            chain(2, true, vec![(ChainService::Pay, true)]),
            chain(3, true, vec![(ChainService::Pay, false)]),
            dead,
        ];

        let combined = ListParams {
            network: Some(NetworkType::Testnet),
            services: vec![ChainService::Pay],
            ..ListParams::default()
        };

        // deprecation then type then service
        let step1 = filter(&chains, &ListParams::default());
        let step1: Vec<ChainRecord> = step1.into_iter().cloned().collect();
        let step2 = filter(
            &step1,
            &ListParams {
                network: Some(NetworkType::Testnet),
                include_deprecated: true,
                ..ListParams::default()
            },
        );
        let step2: Vec<ChainRecord> = step2.into_iter().cloned().collect();
        let step3 = filter(
            &step2,
            &ListParams {
                services: vec![ChainService::Pay],
                include_deprecated: true,
                ..ListParams::default()
            },
        );

        // service then type then deprecation
        let alt1 = filter(
            &chains,
            &ListParams {
                services: vec![ChainService::Pay],
                include_deprecated: true,
                ..ListParams::default()
            },
        );
        let alt1: Vec<ChainRecord> = alt1.into_iter().cloned().collect();
        let alt2 = filter(
            &alt1,
            &ListParams {
                network: Some(NetworkType::Testnet),
                include_deprecated: true,
                ..ListParams::default()
            },
        );
        let alt2: Vec<ChainRecord> = alt2.into_iter().cloned().collect();
        let alt3 = filter(&alt2, &ListParams::default());

        assert_eq!(ids(&step3), vec![2]);
        assert_eq!(ids(&step3), ids(&alt3));
        assert_eq!(ids(&filter(&chains, &combined)), ids(&alt3));
    }
}
