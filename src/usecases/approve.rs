//! Token Approval Submission
//!
//! Builds and submits the standard-specific approval operation for a token,
//! then normalizes the resulting chain operation into the gateway's standard
//! transaction-effect record.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::amount::{format_amount, max_approval_amount, parse_amount};
use crate::domain::token::{TokenInfo, TokenStandard};
use crate::domain::transaction::{normalize_transaction, CustomTransaction};
use crate::error::{GatewayError, Result};
use crate::ports::chain_client::{ApprovalCall, ChainClient};

/// Approval submission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
  /// Owner account; its wallet signs the operation.
  pub address: String,
  /// Account being granted spending rights.
  pub spender: String,
  /// Symbol of the token to approve.
  pub token: String,
  /// Human-readable amount. Absent means unlimited approval.
  #[serde(default)]
  pub amount: Option<String>,
}

/// Submitted approval plus the normalized transaction effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveResponse {
  pub network: String,
  /// Request start, epoch millis.
  pub timestamp: i64,
  /// Wall-clock millis from request start to normalization.
  pub latency: i64,
  /// Contract address of the approved token.
  pub token_address: String,
  pub spender: String,
  /// Decimal-scaled amount that was requested.
  pub amount: String,
  /// Operation counter consumed by the submission.
  pub nonce: u64,
  /// Normalized transaction-effect record.
  pub approval: CustomTransaction,
}

/// Build the approval call for a token, shaped by its standard.
///
/// FA1.2 grants a bounded allowance via `approve`. FA2 grants all-or-nothing
/// operator rights over one asset id via `update_operators`; the amount has
/// no on-chain effect there and is deliberately absent from the parameters.
pub fn build_approval_call(
  token: &TokenInfo,
  owner: &str,
  spender: &str,
  value: &BigUint,
) -> Result<ApprovalCall> {
  match token.standard {
    TokenStandard::Fa12 => Ok(ApprovalCall {
      contract: token.address.clone(),
      entrypoint: "approve".to_string(),
      parameters: json!({
        "spender": spender,
        "value": value.to_string(),
      }),
    }),
    TokenStandard::Fa2 => {
      let token_id = token
        .token_id
        .ok_or_else(|| GatewayError::token_not_supported(token.symbol.clone()))?;
      Ok(ApprovalCall {
        contract: token.address.clone(),
        entrypoint: "update_operators".to_string(),
        parameters: json!([
          {
            "add_operator": {
              "owner": owner,
              "operator": spender,
              "token_id": token_id,
            }
          }
        ]),
      })
    }
  }
}

/// Submit a token approval and await its inclusion.
pub async fn approve_token(client: &dyn ChainClient, req: &ApproveRequest) -> Result<ApproveResponse> {
  let started = chrono::Utc::now();

  // Wallet first: an unloadable key is a wallet fault, never a token fault.
  let wallet = client
    .wallet(&req.address)
    .await
    .map_err(|e| GatewayError::wallet_unavailable(&req.address, e))?;

  let token = client
    .token_info(&req.token)
    .ok_or_else(|| GatewayError::token_not_supported(req.token.clone()))?;

  let value = match &req.amount {
    Some(amount) => parse_amount(amount, token.decimals)?,
    None => max_approval_amount(),
  };

  let call = build_approval_call(&token, &req.address, &req.spender, &value)?;
  let submitted = wallet.submit_call(&call).await?;

  // A submission without interpretable contents cannot be normalized.
  let first = submitted
    .results
    .first()
    .ok_or_else(|| GatewayError::token_not_supported(req.token.clone()))?;

  let chain_id = client.chain_id().await?;
  let approval = normalize_transaction(first, &submitted.hash, &chain_id)?;

  let latency = (chrono::Utc::now() - started).num_milliseconds();
  info!(
    token = %req.token,
    spender = %req.spender,
    hash = %submitted.hash,
    nonce = submitted.counter,
    latency,
    "approval submitted"
  );

  Ok(ApproveResponse {
    network: client.network().to_string(),
    timestamp: started.timestamp_millis(),
    latency,
    token_address: token.address,
    spender: req.spender.clone(),
    amount: format_amount(&value, token.decimals),
    nonce: submitted.counter,
    approval,
  })
}
