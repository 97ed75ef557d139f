//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and providing
//! clear error messages for misconfiguration.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::token::TokenStandard;

use super::GatewayConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<GatewayConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: GatewayConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    network = %config.network.name,
    tokens = config.tokens.len(),
    signers = config.signers.len(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
pub fn validate_config(config: &GatewayConfig) -> Result<()> {
  // Server validation
  config
    .server
    .bind
    .parse::<std::net::SocketAddr>()
    .with_context(|| format!("server.bind is not a socket address: {}", config.server.bind))?;
  anyhow::ensure!(
    config.server.request_timeout_ms > 0,
    "server.request_timeout_ms must be positive"
  );

  // Network validation
  anyhow::ensure!(!config.network.name.is_empty(), "network.name must not be empty");
  for (field, url) in [
    ("network.node_url", &config.network.node_url),
    ("network.indexer_url", &config.network.indexer_url),
  ] {
    anyhow::ensure!(
      url.starts_with("http://") || url.starts_with("https://"),
      "{} must be an http(s) URL, got {}",
      field,
      url
    );
  }
  anyhow::ensure!(
    !config.network.native_symbol.is_empty(),
    "network.native_symbol must not be empty"
  );

  // Registry validation
  let mut symbols = HashSet::new();
  for (i, token) in config.tokens.iter().enumerate() {
    anyhow::ensure!(!token.symbol.is_empty(), "tokens[{}] has empty symbol", i);
    anyhow::ensure!(
      !token.address.is_empty(),
      "tokens[{}] ({}) has empty address",
      i,
      token.symbol
    );
    anyhow::ensure!(
      symbols.insert(token.symbol.clone()),
      "tokens[{}] duplicates symbol {}",
      i,
      token.symbol
    );
    anyhow::ensure!(
      token.symbol != config.network.native_symbol,
      "tokens[{}] shadows the native symbol {}",
      i,
      token.symbol
    );
    anyhow::ensure!(
      token.decimals <= 18,
      "tokens[{}] ({}) has decimals {}, expected at most 18",
      i,
      token.symbol,
      token.decimals
    );
    if token.standard == TokenStandard::Fa2 {
      anyhow::ensure!(
        token.token_id.is_some(),
        "tokens[{}] ({}) is fa2 but has no token_id",
        i,
        token.symbol
      );
    }
  }

  // Signer validation
  let mut signer_addresses = HashSet::new();
  for (i, signer) in config.signers.iter().enumerate() {
    anyhow::ensure!(!signer.address.is_empty(), "signers[{}] has empty address", i);
    anyhow::ensure!(
      !signer.secret_key_env.is_empty(),
      "signers[{}] ({}) has empty secret_key_env",
      i,
      signer.address
    );
    anyhow::ensure!(
      signer_addresses.insert(signer.address.clone()),
      "signers[{}] duplicates address {}",
      i,
      signer.address
    );
  }

  // Submission validation
  anyhow::ensure!(config.submit.gas_limit > 0, "submit.gas_limit must be positive");
  anyhow::ensure!(
    config.submit.confirm_attempts > 0,
    "submit.confirm_attempts must be positive"
  );
  anyhow::ensure!(
    config.submit.confirm_interval_ms > 0,
    "submit.confirm_interval_ms must be positive"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn base_config() -> GatewayConfig {
    toml::from_str(
      r#"
      [server]
      bind = "127.0.0.1:8732"

      [network]
      name = "ghostnet"
      node_url = "https://rpc.ghostnet.teztnets.com"
      indexer_url = "https://api.ghostnet.tzkt.io"

      [[tokens]]
      symbol = "USDT"
      address = "KT1XnTn74bUtxHfDtBmm2bGZAQfhPbvKWR8o"
      token_id = 0
      decimals = 6
      standard = "fa2"

      [[tokens]]
      symbol = "tzBTC"
      address = "KT1PWx2mnDueood7fEmfbBDKx1D9BAnnXitn"
      decimals = 8
      standard = "fa1.2"

      [[signers]]
      address = "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb"
      secret_key_env = "GATEWAY_SIGNER_SK"
      "#,
    )
    .unwrap()
  }

  #[test]
  fn test_valid_config_passes() {
    assert!(validate_config(&base_config()).is_ok());
  }

  #[test]
  fn test_defaults_fill_in() {
    let config = base_config();
    assert_eq!(config.network.native_symbol, "XTZ");
    assert_eq!(config.network.native_decimals, 6);
    assert_eq!(config.server.log_level, "info");
    assert_eq!(config.submit.confirm_attempts, 20);
  }

  #[test]
  fn test_duplicate_symbol_rejected() {
    let mut config = base_config();
    let dup = config.tokens[0].clone();
    config.tokens.push(dup);
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_native_symbol_shadowing_rejected() {
    let mut config = base_config();
    config.tokens[0].symbol = "XTZ".to_string();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_fa2_requires_token_id() {
    let mut config = base_config();
    config.tokens[0].token_id = None;
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_bad_bind_rejected() {
    let mut config = base_config();
    config.server.bind = "not-an-addr".to_string();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_bad_node_url_rejected() {
    let mut config = base_config();
    config.network.node_url = "ftp://example".to_string();
    assert!(validate_config(&config).is_err());
  }
}
