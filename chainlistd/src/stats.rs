use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Poll lifecycle for one watched RPC endpoint. A failed probe moves the
/// endpoint to `Stopped`; there is no transition back to `Polling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PollState {
    Polling,
    Stopped,
}

/// One successful probe of an RPC endpoint
#[derive(Debug, Clone, Copy)]
pub struct RpcProbe {
    pub latency_ms: u64,
    pub block_height: u64,
}

/// Latest stats for a watched chain, as served by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStats {
    pub state: PollState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A chain whose RPC endpoint the poller watches
#[derive(Debug, Clone)]
pub struct StatsTarget {
    pub chain_id: u64,
    pub rpc_url: String,
}

struct PollEntry {
    rpc_url: String,
    state: PollState,
    last: Option<(RpcProbe, DateTime<Utc>)>,
}

impl PollEntry {
    fn new(rpc_url: String) -> Self {
        Self {
            rpc_url,
            state: PollState::Polling,
            last: None,
        }
    }

    fn note(&mut self, result: Result<RpcProbe>, now: DateTime<Utc>) {
        match result {
            Ok(probe) => self.last = Some((probe, now)),
            Err(_) => self.state = PollState::Stopped,
        }
    }

    fn stats(&self) -> ChainStats {
        ChainStats {
            state: self.state,
            latency_ms: self.last.map(|(probe, _)| probe.latency_ms),
            block_height: self.last.map(|(probe, _)| probe.block_height),
            updated_at: self.last.map(|(_, at)| at),
        }
    }
}

/// Commands sent to the stats task
pub enum StatsCommand {
    Get(u64, oneshot::Sender<Option<ChainStats>>),
}

/// Handle to query the stats task
#[derive(Clone)]
pub struct StatsHandle {
    tx: mpsc::Sender<StatsCommand>,
}

impl StatsHandle {
    /// Latest stats for a chain; None when the chain is not watched
    pub async fn get(&self, chain_id: u64) -> Result<Option<ChainStats>> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(StatsCommand::Get(chain_id, reply)).await?;
        Ok(rx.await?)
    }
}

/// Spawn the poller task for the configured watch list
pub fn spawn(
    client: Client,
    targets: Vec<StatsTarget>,
    poll_interval: Duration,
    cancel: CancellationToken,
) -> (StatsHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(256);
    let task = tokio::spawn(run(client, targets, poll_interval, rx, cancel));
    (StatsHandle { tx }, task)
}

async fn run(
    client: Client,
    targets: Vec<StatsTarget>,
    poll_interval: Duration,
    mut rx: mpsc::Receiver<StatsCommand>,
    cancel: CancellationToken,
) {
    let mut entries: HashMap<u64, PollEntry> = targets
        .into_iter()
        .map(|target| (target.chain_id, PollEntry::new(target.rpc_url)))
        .collect();

    if !entries.is_empty() {
        tracing::info!("Polling RPC stats for {} chains", entries.len());
    }

    let mut interval = tokio::time::interval(poll_interval);

    loop {
        tokio::select! {
            Some(cmd) = rx.recv() => {
                match cmd {
                    StatsCommand::Get(chain_id, reply) => {
                        let _ = reply.send(entries.get(&chain_id).map(PollEntry::stats));
                    }
                }
            }
            _ = interval.tick() => {
                let probes: Vec<_> = entries
                    .iter()
                    .filter(|(_, entry)| entry.state == PollState::Polling)
                    .map(|(chain_id, entry)| {
                        let client = client.clone();
                        let rpc_url = entry.rpc_url.clone();
                        let chain_id = *chain_id;
                        async move { (chain_id, probe(&client, &rpc_url).await) }
                    })
                    .collect();

                for (chain_id, result) in join_all(probes).await {
                    if let Err(e) = &result {
                        tracing::warn!("RPC probe for chain {} failed, stopping poller: {}", chain_id, e);
                    }
                    if let Some(entry) = entries.get_mut(&chain_id) {
                        entry.note(result, Utc::now());
                    }
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("Stats poller shutting down");
                break;
            }
        }
    }
}

/// One JSON-RPC block-number request, timed end to end
async fn probe(client: &Client, rpc_url: &str) -> Result<RpcProbe> {
    let started = Instant::now();

    let response = client
        .post(rpc_url)
        .json(&json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
            "id": 1,
        }))
        .send()
        .await?
        .error_for_status()?;

    let body: serde_json::Value = response.json().await?;
    let latency_ms = started.elapsed().as_millis() as u64;

    let block_height = body["result"]
        .as_str()
        .context("result missing from RPC response")
        .and_then(parse_block_number)?;

    Ok(RpcProbe {
        latency_ms,
        block_height,
    })
}

fn parse_block_number(hex: &str) -> Result<u64> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    u64::from_str_radix(digits, 16).context("block number is not valid hex")
}
