//! Allowance Aggregation
//!
//! Fetches spender allowances for every resolved token concurrently. FA1.2
//! tokens have no queryable allowance in this design and short-circuit a
//! fixed zero string without touching the chain.

use std::collections::BTreeMap;

use chrono::Utc;
use futures_util::future::{try_join_all, BoxFuture};
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::amount::format_amount;
use crate::domain::token::TokenStandard;
use crate::error::{GatewayError, Result};
use crate::ports::chain_client::ChainClient;
use crate::usecases::tokens::resolve_tokens;

/// Fixed allowance reported for tokens whose standard has no allowance
/// concept, independent of owner, spender, and the token's own decimals.
pub const FIXED_ZERO_ALLOWANCE: &str = "0.000000";

/// Allowance query: how much may `spender` move out of `address`, per token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowancesRequest {
  /// Owner account.
  pub address: String,
  /// Account whose spending allowance is queried.
  pub spender: String,
  /// Requested symbols; duplicates and unknowns are tolerated.
  pub tokens: Vec<String>,
}

/// Assembled allowances, decimal-scaled per token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceResponse {
  pub network: String,
  /// Request start, epoch millis.
  pub timestamp: i64,
  /// Wall-clock millis the aggregation took.
  pub latency: i64,
  /// Spender the allowances were queried for.
  pub spender: String,
  /// Symbol → decimal-string allowance.
  pub allowances: BTreeMap<String, String>,
}

/// Fetch allowances for every requested symbol that resolves. Faults with
/// the token-not-supported code when nothing resolves.
pub async fn fetch_allowances(
  client: &dyn ChainClient,
  req: &AllowancesRequest,
) -> Result<AllowanceResponse> {
  let started = Utc::now();
  let resolved = resolve_tokens(client, &req.tokens);

  let mut fetches: Vec<BoxFuture<'_, anyhow::Result<(String, String)>>> = Vec::new();

  for (symbol, token) in &resolved {
    match token.standard {
      TokenStandard::Fa12 => {
        let symbol = symbol.clone();
        fetches.push(async move { Ok((symbol, FIXED_ZERO_ALLOWANCE.to_string())) }.boxed());
      }
      TokenStandard::Fa2 => {
        if token.token_id.is_none() {
          debug!(symbol = %symbol, "token has no asset id, skipping allowance fetch");
          continue;
        }
        let owner = req.address.clone();
        let spender = req.spender.clone();
        fetches.push(
          async move {
            let raw = client.token_allowance(token, &owner, &spender).await?;
            Ok((symbol.clone(), format_amount(&raw, token.decimals)))
          }
          .boxed(),
        );
      }
    }
  }

  let pairs = try_join_all(fetches).await?;
  let allowances: BTreeMap<String, String> = pairs.into_iter().collect();

  if allowances.is_empty() {
    return Err(GatewayError::token_not_supported(req.tokens.join(", ")));
  }

  let latency = (Utc::now() - started).num_milliseconds();
  info!(
    address = %req.address,
    spender = %req.spender,
    tokens = allowances.len(),
    latency,
    "allowances assembled"
  );

  Ok(AllowanceResponse {
    network: client.network().to_string(),
    timestamp: started.timestamp_millis(),
    latency,
    spender: req.spender.clone(),
    allowances,
  })
}
