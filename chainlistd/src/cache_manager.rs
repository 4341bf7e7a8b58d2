use anyhow::Result;
use chrono::Utc;
use tokio::sync::{mpsc, oneshot, watch};

use crate::cache::snapshot::CatalogSnapshot;
use crate::config::CacheConfig;
use crate::fetch::{CatalogClient, CatalogUnavailable};

/// Commands sent to the catalog cache task
pub enum CatalogCommand {
    Get(oneshot::Sender<Result<CatalogSnapshot, CatalogUnavailable>>),
    Shutdown,
}

/// Handle to interact with the catalog snapshot cache
#[derive(Clone)]
pub struct CatalogHandle {
    tx: mpsc::Sender<CatalogCommand>,
}

impl CatalogHandle {
    /// Spawn the cache task. The task owns the snapshot and the fetcher;
    /// refreshes happen inside it, so concurrent readers observe one
    /// snapshot and racing refreshes resolve to last-fetch-wins.
    pub fn spawn(
        client: CatalogClient,
        config: CacheConfig,
        fingerprint_tx: watch::Sender<String>,
    ) -> Self {
        let (tx, mut rx) = mpsc::channel::<CatalogCommand>(256);

        tokio::spawn(async move {
            let mut current: Option<CatalogSnapshot> = None;

            while let Some(cmd) = rx.recv().await {
                match cmd {
                    CatalogCommand::Get(reply) => {
                        let result =
                            snapshot_for_read(&client, &config, &mut current, &fingerprint_tx)
                                .await;
                        let _ = reply.send(result);
                    }
                    CatalogCommand::Shutdown => {
                        tracing::info!("Catalog cache shutting down");
                        break;
                    }
                }
            }
        });

        Self { tx }
    }

    /// Get the current catalog snapshot, refreshing it first if it is
    /// missing or older than the cache window
    pub async fn get(&self) -> Result<CatalogSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(CatalogCommand::Get(reply)).await?;
        Ok(rx.await??)
    }

    /// Shutdown the cache task
    pub async fn shutdown(&self) -> Result<()> {
        self.tx.send(CatalogCommand::Shutdown).await?;
        Ok(())
    }
}

/// Serve the cached snapshot while it is inside the TTL window; otherwise
/// re-fetch. A failed fetch propagates to the reader — a stale snapshot is
/// never served in its place.
async fn snapshot_for_read(
    client: &CatalogClient,
    config: &CacheConfig,
    current: &mut Option<CatalogSnapshot>,
    fingerprint_tx: &watch::Sender<String>,
) -> Result<CatalogSnapshot, CatalogUnavailable> {
    if let Some(snapshot) = current.as_ref() {
        if !snapshot.is_stale(config.ttl_secs, Utc::now()) {
            return Ok(snapshot.clone());
        }
    }

    let chains = client.fetch_catalog().await?;
    let snapshot = CatalogSnapshot::new(chains, Utc::now());
    let _ = fingerprint_tx.send(snapshot.fingerprint.clone());
    tracing::info!("Refreshed catalog snapshot ({} chains)", snapshot.chains.len());

    *current = Some(snapshot.clone());
    Ok(snapshot)
}
