use std::str::FromStr;

use shared::types::ChainService;

use crate::pipeline::DEFAULT_PAGE;
use crate::view::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl FromStr for NetworkType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            _ => Err(()),
        }
    }
}

/// The requested view of the catalog, derived fresh per request and
/// discarded after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub network: Option<NetworkType>,
    pub services: Vec<ChainService>,
    pub include_deprecated: bool,
    pub query: Option<String>,
    pub page: usize,
    pub view: Option<ViewMode>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            network: None,
            services: Vec::new(),
            include_deprecated: false,
            query: None,
            page: DEFAULT_PAGE,
            view: None,
        }
    }
}

impl ListParams {
    /// Parse URL-style parameters. An unparseable value is not an error; it
    /// falls back to whatever an absent parameter would get.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(raw) = raw else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "type" => params.network = value.parse().ok(),
                "service" => {
                    if let Ok(kind) = value.parse::<ChainService>() {
                        if !params.services.contains(&kind) {
                            params.services.push(kind);
                        }
                    }
                }
                "includeDeprecated" => {
                    params.include_deprecated = matches!(value.as_ref(), "true" | "1");
                }
                "query" => {
                    params.query = (!value.is_empty()).then(|| value.into_owned());
                }
                "page" => {
                    params.page = value
                        .parse()
                        .ok()
                        .filter(|page| *page >= 1)
                        .unwrap_or(DEFAULT_PAGE);
                }
                "view" => params.view = value.parse().ok(),
                _ => {}
            }
        }

        params
    }
}
