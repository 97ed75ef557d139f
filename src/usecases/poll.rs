//! Transaction Status Classification
//!
//! Determines a transaction's lifecycle state by probing the five mempool
//! partitions in strict priority order, falling back to a finalized-chain
//! lookup. "Unknown to mempool and chain" is a valid outcome, reported as
//! status -1 rather than raised as a fault.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::domain::transaction::TxStatus;
use crate::error::Result;
use crate::ports::chain_client::{ChainClient, MempoolSnapshot};

/// Status query for one transaction hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRequest {
  pub tx_hash: String,
}

/// Classified lifecycle state plus the chain head at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
  pub network: String,
  /// Chain head height when the classification ran.
  pub current_block: u64,
  /// Request start, epoch millis.
  pub timestamp: i64,
  pub tx_hash: String,
  /// Numeric lifecycle code (1..5, or -1 for unknown).
  pub tx_status: TxStatus,
  /// Raw operation contents, present only for a definite applied state.
  pub tx_data: Option<Value>,
}

/// Ordered first-match classification over the mempool partitions.
///
/// The check order is the priority order; a hash is never matched against
/// more than one partition's found-branch even if the snapshot were not
/// disjoint. Only the applied partition carries operation contents out.
pub fn classify_mempool(hash: &str, mempool: &MempoolSnapshot) -> Option<(TxStatus, Option<Value>)> {
  let partitions = [
    (TxStatus::Applied, &mempool.applied),
    (TxStatus::BranchDelayed, &mempool.branch_delayed),
    (TxStatus::BranchRefused, &mempool.branch_refused),
    (TxStatus::Refused, &mempool.refused),
    (TxStatus::Unprocessed, &mempool.unprocessed),
  ];

  for (status, operations) in partitions {
    if let Some(op) = operations.iter().find(|op| op.hash == hash) {
      let data = (status == TxStatus::Applied).then(|| op.contents.clone());
      return Some((status, data));
    }
  }
  None
}

/// Classify a transaction against the mempool, then the finalized chain.
pub async fn poll_transaction(client: &dyn ChainClient, req: &PollRequest) -> Result<PollResponse> {
  let started = Utc::now();
  let current_block = client.head_level().await?;
  let mempool = client.mempool_snapshot().await?;

  let (tx_status, tx_data) = match classify_mempool(&req.tx_hash, &mempool) {
    Some(classified) => classified,
    // Only consulted when no partition matched.
    None => match client.find_transaction(&req.tx_hash).await? {
      Some(contents) => (TxStatus::Applied, Some(contents)),
      None => (TxStatus::Unknown, None),
    },
  };

  info!(
    tx_hash = %req.tx_hash,
    status = tx_status.code(),
    current_block,
    "transaction classified"
  );

  Ok(PollResponse {
    network: client.network().to_string(),
    current_block,
    timestamp: started.timestamp_millis(),
    tx_hash: req.tx_hash.clone(),
    tx_status,
    tx_data,
  })
}
