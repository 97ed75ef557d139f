//! Account Nonce Lookup
//!
//! Reads the account's operation counter through the chain client.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::ports::chain_client::ChainClient;

/// Nonce query for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonceRequest {
  pub address: String,
}

/// The account's current operation counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceResponse {
  pub network: String,
  /// Request start, epoch millis.
  pub timestamp: i64,
  /// Wall-clock millis the lookup took.
  pub latency: i64,
  pub address: String,
  pub nonce: u64,
}

/// Fetch the operation counter for an account.
pub async fn fetch_nonce(client: &dyn ChainClient, req: &NonceRequest) -> Result<NonceResponse> {
  let started = Utc::now();
  let nonce = client.account_counter(&req.address).await?;
  let latency = (Utc::now() - started).num_milliseconds();

  info!(address = %req.address, nonce, latency, "nonce fetched");

  Ok(NonceResponse {
    network: client.network().to_string(),
    timestamp: started.timestamp_millis(),
    latency,
    address: req.address.clone(),
    nonce,
  })
}
