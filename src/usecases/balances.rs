//! Balance Aggregation
//!
//! Fetches the native balance (when requested) and every resolved token's
//! balance concurrently, then assembles a symbol → decimal-string mapping.

use std::collections::BTreeMap;

use chrono::Utc;
use futures_util::future::{try_join_all, BoxFuture};
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::amount::format_amount;
use crate::error::{GatewayError, Result};
use crate::ports::chain_client::ChainClient;
use crate::usecases::tokens::resolve_tokens;

/// Balance query for one account over a set of token symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancesRequest {
  /// Account whose balances are read.
  pub address: String,
  /// Requested symbols; duplicates and unknowns are tolerated.
  pub tokens: Vec<String>,
}

/// Assembled balances, decimal-scaled per token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
  pub network: String,
  /// Request start, epoch millis.
  pub timestamp: i64,
  /// Wall-clock millis the aggregation took.
  pub latency: i64,
  /// Symbol → decimal-string amount, already scaled by each token's decimals.
  pub balances: BTreeMap<String, String>,
}

/// Fetch balances for every requested symbol that resolves to a fetchable
/// token. Faults with the token-not-supported code when nothing resolves.
pub async fn fetch_balances(
  client: &dyn ChainClient,
  req: &BalancesRequest,
) -> Result<BalanceResponse> {
  let started = Utc::now();
  let resolved = resolve_tokens(client, &req.tokens);

  let mut fetches: Vec<BoxFuture<'_, anyhow::Result<(String, String)>>> = Vec::new();

  // The native asset is not a registry entry: membership is tested against
  // the raw requested symbols, before any registry lookup.
  let native = client.native_token();
  if req.tokens.iter().any(|s| *s == native.symbol) {
    let symbol = native.symbol.clone();
    let decimals = native.decimals;
    let address = req.address.clone();
    fetches.push(
      async move {
        let raw = client.native_balance(&address).await?;
        Ok((symbol, format_amount(&raw, decimals)))
      }
      .boxed(),
    );
  }

  for (symbol, token) in &resolved {
    if token.token_id.is_none() {
      debug!(symbol = %symbol, "token has no asset id, skipping balance fetch");
      continue;
    }
    let address = req.address.clone();
    fetches.push(
      async move {
        let raw = client.token_balance(token, &address).await?;
        Ok((symbol.clone(), format_amount(&raw, token.decimals)))
      }
      .boxed(),
    );
  }

  // Every fetch is issued before any result is consumed; completion order is
  // unconstrained and a single failure aborts the whole aggregation.
  let pairs = try_join_all(fetches).await?;
  let balances: BTreeMap<String, String> = pairs.into_iter().collect();

  if balances.is_empty() {
    return Err(GatewayError::token_not_supported(req.tokens.join(", ")));
  }

  let latency = (Utc::now() - started).num_milliseconds();
  info!(
    address = %req.address,
    tokens = balances.len(),
    latency,
    "balances assembled"
  );

  Ok(BalanceResponse {
    network: client.network().to_string(),
    timestamp: started.timestamp_millis(),
    latency,
    balances,
  })
}
