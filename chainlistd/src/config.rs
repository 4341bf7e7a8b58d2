use std::path::Path;
use serde::Deserialize;
use anyhow::{Context, Result};
use shared::protocol::{CATALOG_HOST_DEV, CATALOG_HOST_PROD};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Upstream catalog identity. Injected into the fetcher at construction;
/// nothing in the daemon reads client identity from ambient state.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Explicit catalog host; defaults per environment when unset
    #[serde(default)]
    pub host: Option<String>,
    pub client_id: String,
    #[serde(default)]
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds a catalog snapshot stays valid before a read re-fetches it
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Chains whose RPC endpoints the stats poller watches
    #[serde(default)]
    pub watch: Vec<WatchTarget>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchTarget {
    pub chain_id: u64,
    pub rpc: String,
}

fn default_ttl() -> u64 {
    3600
}

fn default_listen() -> String {
    "[::]:8080".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            watch: Vec::new(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl CatalogConfig {
    /// Catalog host to fetch from: the configured override, or the
    /// environment's default
    pub fn host(&self) -> &str {
        match &self.host {
            Some(host) => host,
            None => match self.environment {
                Environment::Production => CATALOG_HOST_PROD,
                Environment::Development => CATALOG_HOST_DEV,
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}
