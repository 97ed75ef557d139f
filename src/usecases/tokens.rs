//! Token Registry Resolution
//!
//! Maps requested token symbols to their registry entries. Unknown symbols
//! are dropped without error; the aggregators fail loudly only when the
//! resulting mapping turns out empty.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::token::TokenInfo;
use crate::ports::chain_client::ChainClient;

/// Resolve an ordered, possibly-duplicated symbol list against the client's
/// registry. The result contains only symbols that resolved.
pub fn resolve_tokens(client: &dyn ChainClient, symbols: &[String]) -> BTreeMap<String, TokenInfo> {
  let mut resolved = BTreeMap::new();
  for symbol in symbols {
    if resolved.contains_key(symbol) {
      continue;
    }
    match client.token_info(symbol) {
      Some(info) => {
        resolved.insert(symbol.clone(), info);
      }
      None => debug!(symbol = %symbol, "unknown token symbol dropped"),
    }
  }
  resolved
}
