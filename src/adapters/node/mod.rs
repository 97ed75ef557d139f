//! Node Adapter - Tezos RPC and Indexer Implementation
//!
//! `RpcChainClient` answers the chain-client port with reads against a
//! Tezos node RPC (balances, counters, head, mempool) and an indexer REST
//! API (token balances, operator sets, finalized operations). `NodeWallet`
//! signs and injects operations: forging is delegated to the node, the
//! signature is a watermarked Blake2b-256 ed25519 signature.

pub mod client;
pub mod wallet;

pub(crate) mod types;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use client::RpcChainClient;
pub use wallet::NodeWallet;

pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: String,
) -> anyhow::Result<T> {
    let response = http
        .get(&url)
        .send()
        .await
        .with_context(|| format!("GET {url} failed"))?;
    anyhow::ensure!(
        response.status().is_success(),
        "GET {url} returned {}",
        response.status()
    );
    response
        .json::<T>()
        .await
        .with_context(|| format!("GET {url} returned an unexpected body"))
}

pub(crate) async fn post_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: String,
    body: &Value,
) -> anyhow::Result<T> {
    let response = http
        .post(&url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("POST {url} failed"))?;
    anyhow::ensure!(
        response.status().is_success(),
        "POST {url} returned {}",
        response.status()
    );
    response
        .json::<T>()
        .await
        .with_context(|| format!("POST {url} returned an unexpected body"))
}
