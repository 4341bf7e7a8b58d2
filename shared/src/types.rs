use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Public metadata for one blockchain network, as served by the catalog
/// endpoint. This is the canonical data model used by the daemon and API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecord {
    /// Numeric chain identifier (unique key)
    pub chain_id: u64,

    /// Display name, e.g. "Polygon"
    pub name: String,

    /// URL-safe slug, e.g. "polygon"
    pub slug: String,

    /// Whether this is a test network
    #[serde(default)]
    pub testnet: bool,

    /// Lifecycle status
    #[serde(default)]
    pub status: ChainStatus,

    /// Native currency descriptor
    pub native_currency: NativeCurrency,

    /// Optional icon reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ChainIcon>,

    /// Capability annotations, in catalog order
    #[serde(default)]
    pub services: Vec<ServiceAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainIcon {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub format: String,
}

/// Chain lifecycle status. Unrecognized upstream values deserialize to
/// `Unknown` so new lifecycle states stay visible rather than failing the
/// whole catalog parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainStatus {
    #[default]
    Active,
    Deprecated,
    #[serde(other)]
    Unknown,
}

/// One capability offered for a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAnnotation {
    pub service: ChainService,
    pub enabled: bool,
}

/// Service kinds recognized by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainService {
    Contracts,
    ConnectSdk,
    Engine,
    AccountAbstraction,
    Pay,
    RpcEdge,
}

impl FromStr for ChainService {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contracts" => Ok(Self::Contracts),
            "connect-sdk" => Ok(Self::ConnectSdk),
            "engine" => Ok(Self::Engine),
            "account-abstraction" => Ok(Self::AccountAbstraction),
            "pay" => Ok(Self::Pay),
            "rpc-edge" => Ok(Self::RpcEdge),
            _ => Err(()),
        }
    }
}

impl ChainRecord {
    /// Effective enabled flag per service kind. A kind appearing more than
    /// once in the annotation list resolves to its last annotation.
    fn service_flags(&self) -> HashMap<ChainService, bool> {
        let mut flags = HashMap::new();
        for annotation in &self.services {
            flags.insert(annotation.service, annotation.enabled);
        }
        flags
    }

    /// Whether the given service kind is enabled for this chain
    pub fn has_service(&self, kind: ChainService) -> bool {
        self.service_flags().get(&kind).copied().unwrap_or(false)
    }

    /// Number of distinct enabled service kinds
    pub fn enabled_service_count(&self) -> usize {
        self.service_flags().values().filter(|enabled| **enabled).count()
    }

    /// Enabled service kinds in first-appearance order, deduplicated
    pub fn enabled_services(&self) -> Vec<ChainService> {
        let flags = self.service_flags();
        let mut seen = Vec::new();
        for annotation in &self.services {
            if flags.get(&annotation.service) == Some(&true) && !seen.contains(&annotation.service)
            {
                seen.push(annotation.service);
            }
        }
        seen
    }
}
