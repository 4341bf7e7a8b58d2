use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tokio::sync::watch;

use shared::protocol::VIEWPORT_WIDTH_HEADER;
use shared::types::ChainRecord;

use crate::cache_manager::CatalogHandle;
use crate::pipeline;
use crate::query::ListParams;
use crate::stats::{ChainStats, StatsHandle};
use crate::view::{self, ChainListPage, ViewMode};

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogHandle,
    pub fingerprint_rx: watch::Receiver<String>,
    pub stats: StatsHandle,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/chainlist", get(list_chains))
        .route("/v1/chainlist/fingerprint", get(get_fingerprint))
        .route("/v1/chainlist/:chain", get(get_chain))
        .route("/v1/chainlist/:chain/stats", get(get_chain_stats))
        .with_state(state)
}

/// The list view: filter, rank and paginate the catalog per the request
/// parameters, then shape the page for the active view mode
async fn list_chains(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Json<ChainListPage>, StatusCode> {
    let params = ListParams::from_query(query.as_deref());
    let view_mode = ViewMode::resolve(params.view, viewport_width_hint(&headers));

    let snapshot = state.catalog.get().await.map_err(|e| {
        tracing::error!("Failed to load catalog: {}", e);
        StatusCode::BAD_GATEWAY
    })?;

    let page = pipeline::run(&snapshot.chains, &params);
    Ok(Json(view::render(page, params.page, view_mode)))
}

async fn get_fingerprint(State(state): State<AppState>) -> String {
    state.fingerprint_rx.borrow().clone()
}

/// One catalog record, addressed by numeric chain id or slug
async fn get_chain(
    State(state): State<AppState>,
    Path(chain): Path<String>,
) -> Result<Json<ChainRecord>, StatusCode> {
    let snapshot = state.catalog.get().await.map_err(|e| {
        tracing::error!("Failed to load catalog: {}", e);
        StatusCode::BAD_GATEWAY
    })?;

    let record = match chain.parse::<u64>() {
        Ok(chain_id) => snapshot.chains.iter().find(|c| c.chain_id == chain_id),
        Err(_) => snapshot.chains.iter().find(|c| c.slug == chain),
    };

    record.cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Latest RPC stats for a watched chain
async fn get_chain_stats(
    State(state): State<AppState>,
    Path(chain_id): Path<u64>,
) -> Result<Json<ChainStats>, StatusCode> {
    state
        .stats
        .get(chain_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to query stats: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn viewport_width_hint(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(VIEWPORT_WIDTH_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
