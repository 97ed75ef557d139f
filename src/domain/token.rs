//! Token registry types.
//!
//! A chain client owns a registry of [`TokenInfo`] entries keyed by symbol.
//! Entries are immutable once loaded; request handling only ever reads them.

use serde::{Deserialize, Serialize};

/// Contract standard of a registered token.
///
/// This is a closed set: anything else is rejected when the registry is
/// deserialized, so the core never sees an unrecognized standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStandard {
    /// Allowance-style standard: `approve(spender, value)` grants a bounded
    /// spending allowance.
    #[serde(rename = "fa1.2")]
    Fa12,
    /// Operator-style standard: `update_operators` grants unlimited transfer
    /// rights over one asset id, with no numeric bound.
    #[serde(rename = "fa2")]
    Fa2,
}

impl std::fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fa12 => write!(f, "fa1.2"),
            Self::Fa2 => write!(f, "fa2"),
        }
    }
}

/// One registry entry: everything the gateway knows about a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Symbol, unique within one chain's registry.
    pub symbol: String,
    /// Contract address (`KT1...`).
    pub address: String,
    /// Asset id inside the contract. Present for multi-asset standards;
    /// a token without one is not fetchable.
    #[serde(default)]
    pub token_id: Option<u64>,
    /// Decimal scale applied when rendering raw amounts.
    pub decimals: u32,
    /// Contract standard governing approval and allowance shape.
    pub standard: TokenStandard,
}

/// The chain's native asset. Not a registry entry; it has no contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeToken {
    /// Native symbol (`XTZ`).
    pub symbol: String,
    /// Decimal scale (6 for mutez).
    pub decimals: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_display() {
        assert_eq!(format!("{}", TokenStandard::Fa12), "fa1.2");
        assert_eq!(format!("{}", TokenStandard::Fa2), "fa2");
    }

    #[test]
    fn test_standard_serde_tags() {
        let fa12: TokenStandard = serde_json::from_str("\"fa1.2\"").unwrap();
        assert_eq!(fa12, TokenStandard::Fa12);
        let fa2: TokenStandard = serde_json::from_str("\"fa2\"").unwrap();
        assert_eq!(fa2, TokenStandard::Fa2);
    }

    #[test]
    fn test_unknown_standard_rejected() {
        let parsed = serde_json::from_str::<TokenStandard>("\"erc20\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_token_info_from_toml_entry() {
        let token: TokenInfo = toml::from_str(
            r#"
            symbol = "USDT"
            address = "KT1XnTn74bUtxHfDtBmm2bGZAQfhPbvKWR8o"
            token_id = 0
            decimals = 6
            standard = "fa2"
            "#,
        )
        .unwrap();
        assert_eq!(token.symbol, "USDT");
        assert_eq!(token.token_id, Some(0));
        assert_eq!(token.standard, TokenStandard::Fa2);
    }

    #[test]
    fn test_token_id_defaults_to_none() {
        let token: TokenInfo = toml::from_str(
            r#"
            symbol = "tzBTC"
            address = "KT1PWx2mnDueood7fEmfbBDKx1D9BAnnXitn"
            decimals = 8
            standard = "fa1.2"
            "#,
        )
        .unwrap();
        assert_eq!(token.token_id, None);
    }
}
