//! Configuration Module - TOML-based Gateway Configuration
//!
//! Loads and validates configuration from `config.toml`. The token registry
//! and all endpoints are externalized here - nothing is hardcoded in the
//! domain layer. Secret key material never lives in the file itself; signer
//! entries only name the environment variable that holds it.

pub mod loader;

use serde::Deserialize;

use crate::domain::token::TokenInfo;

/// Top-level gateway configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated before
/// the gateway begins serving.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
  /// HTTP surface configuration.
  pub server: ServerConfig,
  /// The (chain, network) pair this instance serves.
  pub network: NetworkConfig,
  /// Token registry owned by the chain client.
  #[serde(default)]
  pub tokens: Vec<TokenInfo>,
  /// Signing wallets available to the approve operation.
  #[serde(default)]
  pub signers: Vec<SignerConfig>,
  /// Operation submission tuning.
  #[serde(default)]
  pub submit: SubmitConfig,
}

/// HTTP surface configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Bind address for the gateway operations.
  #[serde(default = "default_bind")]
  pub bind: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Outbound request timeout (milliseconds).
  #[serde(default = "default_timeout_ms")]
  pub request_timeout_ms: u64,
}

/// Network endpoints and native-asset description.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
  /// Network name (`mainnet`, `ghostnet`, ...).
  pub name: String,
  /// Tezos node RPC base URL.
  pub node_url: String,
  /// Indexer REST base URL (token balances, operator sets, finalized ops).
  pub indexer_url: String,
  /// Native asset symbol.
  #[serde(default = "default_native_symbol")]
  pub native_symbol: String,
  /// Native asset decimal scale.
  #[serde(default = "default_native_decimals")]
  pub native_decimals: u32,
}

/// One signing wallet the gateway may load.
///
/// The secret key (base58 `edsk...` seed) is read from the named environment
/// variable at wallet-load time, never stored in config.
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
  /// Implicit account address (`tz1...`).
  pub address: String,
  /// Environment variable holding the account's secret key.
  pub secret_key_env: String,
}

/// Operation submission tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitConfig {
  /// Fee attached to submitted operations, in mutez.
  #[serde(default = "default_fee")]
  pub fee_mutez: u64,
  /// Gas budget for submitted operations.
  #[serde(default = "default_gas_limit")]
  pub gas_limit: u64,
  /// Storage budget for submitted operations.
  #[serde(default = "default_storage_limit")]
  pub storage_limit: u64,
  /// Confirmation polls before a submission counts as lost.
  #[serde(default = "default_confirm_attempts")]
  pub confirm_attempts: u32,
  /// Interval between confirmation polls (milliseconds).
  #[serde(default = "default_confirm_interval")]
  pub confirm_interval_ms: u64,
}

impl Default for SubmitConfig {
  fn default() -> Self {
    Self {
      fee_mutez: default_fee(),
      gas_limit: default_gas_limit(),
      storage_limit: default_storage_limit(),
      confirm_attempts: default_confirm_attempts(),
      confirm_interval_ms: default_confirm_interval(),
    }
  }
}

// Default value functions for serde

fn default_bind() -> String {
  "0.0.0.0:8732".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_timeout_ms() -> u64 {
  30_000
}

fn default_native_symbol() -> String {
  "XTZ".to_string()
}

fn default_native_decimals() -> u32 {
  6
}

fn default_fee() -> u64 {
  1_420
}

fn default_gas_limit() -> u64 {
  10_600
}

fn default_storage_limit() -> u64 {
  300
}

fn default_confirm_attempts() -> u32 {
  20
}

fn default_confirm_interval() -> u64 {
  5_000
}
