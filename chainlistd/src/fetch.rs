use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use shared::protocol::{
    CATALOG_PATH, CLIENT_ID_PLACEHOLDER, RPC_HOST_SUFFIX_DEV, RPC_HOST_SUFFIX_PROD,
};
use shared::types::ChainRecord;

use crate::config::{CatalogConfig, Environment};

/// The remote catalog could not be fetched. The render that needed it fails
/// hard; no partial catalog is ever served.
#[derive(Debug, Error)]
pub enum CatalogUnavailable {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog endpoint returned {0}")]
    Status(StatusCode),
}

/// Response envelope of the catalog endpoint
#[derive(Deserialize)]
struct CatalogEnvelope {
    data: Vec<ChainRecord>,
}

/// Shared HTTP client for upstream requests
pub fn http_client() -> Client {
    Client::builder()
        .user_agent(concat!("chainlistd/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Read-only client for the upstream catalog endpoint. Client identity and
/// environment are injected here at construction; nothing downstream reads
/// them from ambient state.
pub struct CatalogClient {
    http: Client,
    catalog_url: String,
}

impl CatalogClient {
    pub fn new(http: Client, config: &CatalogConfig) -> Self {
        let catalog_url = format!("{}{}?includeServices=true", config.host(), CATALOG_PATH);
        Self { http, catalog_url }
    }

    /// Fetch the full chain catalog with service annotations inline.
    /// A single failed fetch propagates without retrying.
    pub async fn fetch_catalog(&self) -> Result<Vec<ChainRecord>, CatalogUnavailable> {
        let response = self.http.get(&self.catalog_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // drain the body so the connection can be reused
            let _ = response.bytes().await;
            return Err(CatalogUnavailable::Status(status));
        }

        let envelope: CatalogEnvelope = response.json().await?;
        Ok(envelope.data)
    }
}

/// Rewrite a managed RPC endpoint URL for this deployment: substitute the
/// client-id placeholder, and point production RPC hostnames at the
/// development ones when running in the development environment.
pub fn rewrite_rpc_url(url: &str, config: &CatalogConfig) -> String {
    let url = url.replace(CLIENT_ID_PLACEHOLDER, &config.client_id);
    match config.environment {
        Environment::Production => url,
        Environment::Development => url.replace(RPC_HOST_SUFFIX_PROD, RPC_HOST_SUFFIX_DEV),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(environment: Environment) -> CatalogConfig {
        CatalogConfig {
            host: None,
            client_id: "client-1234".to_string(),
            environment,
        }
    }

    #[test]
    fn test_rewrite_substitutes_client_id() {
        let url = rewrite_rpc_url(
            "https://1.rpc.chainlist.org/${CLIENT_ID}",
            &test_config(Environment::Production),
        );
        assert_eq!(url, "https://1.rpc.chainlist.org/client-1234");
    }

    #[test]
    fn test_rewrite_swaps_host_in_development() {
        let url = rewrite_rpc_url(
            "https://1.rpc.chainlist.org/${CLIENT_ID}",
            &test_config(Environment::Development),
        );
        assert_eq!(url, "https://1.rpc.chainlist-dev.org/client-1234");
    }

    #[test]
    fn test_rewrite_leaves_foreign_hosts_alone() {
        let url = rewrite_rpc_url(
            "https://rpc.example.com/",
            &test_config(Environment::Development),
        );
        assert_eq!(url, "https://rpc.example.com/");
    }

    #[test]
    fn test_catalog_url_requests_inline_services() {
        let client = CatalogClient::new(http_client(), &test_config(Environment::Production));
        assert_eq!(
            client.catalog_url,
            "https://api.chainlist.org/v1/chains?includeServices=true"
        );
    }
}
