use std::str::FromStr;

use serde::Serialize;
use shared::types::{ChainRecord, ChainService, ChainStatus};

use crate::pipeline::Page;

/// Presentation layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Table,
    Grid,
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "grid" => Ok(Self::Grid),
            _ => Err(()),
        }
    }
}

impl ViewMode {
    /// Resolve the active view: an explicit request wins, otherwise wide
    /// viewports get the table and everything else the card grid.
    pub fn resolve(requested: Option<ViewMode>, viewport_width: Option<u32>) -> ViewMode {
        requested.unwrap_or_else(|| {
            if viewport_width.unwrap_or(0) >= 1000 {
                ViewMode::Table
            } else {
                ViewMode::Grid
            }
        })
    }
}

/// Fields a row or card needs about one chain
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainListItem {
    pub chain_id: u64,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub currency_symbol: String,
    pub enabled_services: Vec<ChainService>,
    pub deprecated: bool,
}

impl From<&ChainRecord> for ChainListItem {
    fn from(chain: &ChainRecord) -> Self {
        Self {
            chain_id: chain.chain_id,
            name: chain.name.clone(),
            slug: chain.slug.clone(),
            icon_url: chain.icon.as_ref().map(|icon| icon.url.clone()),
            currency_symbol: chain.native_currency.symbol.clone(),
            enabled_services: chain.enabled_services(),
            deprecated: chain.status == ChainStatus::Deprecated,
        }
    }
}

/// Exactly one of the empty state, the table or the card grid
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListBody {
    Empty,
    Table { rows: Vec<ChainListItem> },
    Grid { cards: Vec<ChainListItem> },
}

/// Everything the presenter consumes for one rendered page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainListPage {
    pub view: ViewMode,
    pub page: usize,
    pub total_pages: usize,
    /// Pagination controls appear only when there is more than one page
    pub show_pagination: bool,
    pub body: ListBody,
}

/// Assemble the presenter payload for one page of results
pub fn render(page: Page<'_>, active_page: usize, view: ViewMode) -> ChainListPage {
    let items: Vec<ChainListItem> = page.items.iter().copied().map(ChainListItem::from).collect();

    let body = if items.is_empty() {
        ListBody::Empty
    } else {
        match view {
            ViewMode::Table => ListBody::Table { rows: items },
            ViewMode::Grid => ListBody::Grid { cards: items },
        }
    };

    ChainListPage {
        view,
        page: active_page,
        total_pages: page.total_pages,
        show_pagination: page.total_pages > 1,
        body,
    }
}
