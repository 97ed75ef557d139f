//! Chain Client Port - Node Interaction Interface
//!
//! Defines the collaborator surface the gateway operations require from a
//! resolved (chain, network) client: registry lookup, balance/allowance
//! reads, mempool and finalized-chain views, and wallet loading for
//! operation submission.

use async_trait::async_trait;
use num_bigint::BigUint;
use serde_json::Value;

use crate::domain::token::{NativeToken, TokenInfo};
use crate::domain::transaction::OperationContent;

/// One not-yet-finalized operation as seen in a mempool partition.
#[derive(Debug, Clone)]
pub struct PendingOperation {
  /// Operation hash.
  pub hash: String,
  /// Raw operation contents as the node reports them.
  pub contents: Value,
}

/// Snapshot of the node's mempool, partitioned by validity classification.
///
/// The node keeps the partitions disjoint; the classifier still stops at the
/// first match.
#[derive(Debug, Clone, Default)]
pub struct MempoolSnapshot {
  /// Valid operations expected in the next block.
  pub applied: Vec<PendingOperation>,
  /// Valid on another branch, or not yet valid on this one.
  pub branch_delayed: Vec<PendingOperation>,
  /// Invalid on this branch.
  pub branch_refused: Vec<PendingOperation>,
  /// Invalid regardless of branch.
  pub refused: Vec<PendingOperation>,
  /// Not yet classified by the node.
  pub unprocessed: Vec<PendingOperation>,
}

/// A contract call the gateway asks a wallet to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalCall {
  /// Target contract address.
  pub contract: String,
  /// Entrypoint name (`approve`, `update_operators`).
  pub entrypoint: String,
  /// Entrypoint arguments in the gateway's semantic JSON shape; the wallet
  /// adapter owns the translation to the chain's concrete encoding.
  pub parameters: Value,
}

/// Outcome of a submitted-and-included operation.
#[derive(Debug, Clone)]
pub struct SubmittedOperation {
  /// Operation hash assigned at injection.
  pub hash: String,
  /// Operation counter consumed by the submission.
  pub counter: u64,
  /// Contents the chain recorded for the operation. Empty means the
  /// submission produced no interpretable effect.
  pub results: Vec<OperationContent>,
}

/// A loaded signing wallet, able to submit contract calls.
#[async_trait]
pub trait Wallet: Send + Sync {
  /// Submit the call and await its inclusion.
  async fn submit_call(&self, call: &ApprovalCall) -> anyhow::Result<SubmittedOperation>;
}

/// Read/submit interface over one already-resolved (chain, network) pair.
///
/// Every async method is a suspension point; the aggregators issue several
/// of them concurrently and must tolerate any completion order.
#[async_trait]
pub trait ChainClient: Send + Sync {
  /// Network name this client serves (`mainnet`, `ghostnet`, ...).
  fn network(&self) -> &str;

  /// The chain's native asset. Not part of the token registry.
  fn native_token(&self) -> &NativeToken;

  /// Registry lookup by symbol. Absent means the token is unknown here.
  fn token_info(&self, symbol: &str) -> Option<TokenInfo>;

  /// Chain identifier of the network.
  async fn chain_id(&self) -> anyhow::Result<String>;

  /// Current chain head height.
  async fn head_level(&self) -> anyhow::Result<u64>;

  /// Account operation counter.
  async fn account_counter(&self, address: &str) -> anyhow::Result<u64>;

  /// Native balance of an account, in raw chain units.
  async fn native_balance(&self, address: &str) -> anyhow::Result<BigUint>;

  /// Token balance of an account, in the token's raw units.
  async fn token_balance(&self, token: &TokenInfo, owner: &str) -> anyhow::Result<BigUint>;

  /// Spender allowance for a token, in the token's raw units.
  async fn token_allowance(
    &self,
    token: &TokenInfo,
    owner: &str,
    spender: &str,
  ) -> anyhow::Result<BigUint>;

  /// Snapshot of the five mempool partitions.
  async fn mempool_snapshot(&self) -> anyhow::Result<MempoolSnapshot>;

  /// Finalized-chain lookup by operation hash.
  async fn find_transaction(&self, hash: &str) -> anyhow::Result<Option<Value>>;

  /// Load a signing wallet for the address. Failing here is a wallet-load
  /// fault, never a token-support fault.
  async fn wallet(&self, address: &str) -> anyhow::Result<Box<dyn Wallet>>;
}
