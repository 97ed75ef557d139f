//! Gateway fault type.
//!
//! Every public operation either returns a plain response record or raises a
//! [`GatewayError`] carrying an HTTP-style status, a message, and an internal
//! code. The surrounding HTTP layer echoes all three verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::amount::AmountError;
use crate::domain::transaction::NormalizeError;

/// Faults a gateway operation can raise.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A request's token set yielded nothing usable: no requested symbol
    /// resolved, an approve referenced an unknown symbol, or a submission
    /// produced no interpretable effect.
    #[error("token not supported: {0}")]
    TokenNotSupported(String),

    /// Signing-key material could not be loaded for the given address.
    #[error("could not load wallet for {address}: {reason}")]
    WalletUnavailable { address: String, reason: String },

    /// An underlying chain-client failure, propagated as-is. Aborts the
    /// whole operation; there is no per-token fault isolation.
    #[error(transparent)]
    Chain(#[from] anyhow::Error),
}

impl GatewayError {
    /// Build the token fault with contextual detail (usually the symbol set
    /// or the single offending symbol).
    pub fn token_not_supported(detail: impl Into<String>) -> Self {
        Self::TokenNotSupported(detail.into())
    }

    /// Build the wallet fault, wrapping the underlying cause's text.
    pub fn wallet_unavailable(address: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::WalletUnavailable {
            address: address.into(),
            reason: cause.to_string(),
        }
    }

    /// HTTP-style status this fault maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TokenNotSupported(_) => StatusCode::BAD_REQUEST,
            Self::WalletUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Chain(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Internal error code exposed to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TokenNotSupported(_) => "TOKEN_NOT_SUPPORTED",
            Self::WalletUnavailable { .. } => "WALLET_UNAVAILABLE",
            Self::Chain(_) => "CHAIN_ERROR",
        }
    }
}

impl From<AmountError> for GatewayError {
    fn from(err: AmountError) -> Self {
        Self::Chain(anyhow::Error::new(err))
    }
}

impl From<NormalizeError> for GatewayError {
    fn from(err: NormalizeError) -> Self {
        Self::Chain(anyhow::Error::new(err))
    }
}

/// Wire body for a fault response.
#[derive(Serialize)]
struct FaultBody {
    message: String,
    code: &'static str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(FaultBody {
            message: self.to_string(),
            code: self.code(),
        });
        (status, body).into_response()
    }
}

/// Result alias used by every gateway operation.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_fault_shape() {
        let err = GatewayError::token_not_supported("FOO");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "TOKEN_NOT_SUPPORTED");
        assert_eq!(err.to_string(), "token not supported: FOO");
    }

    #[test]
    fn test_wallet_fault_wraps_cause() {
        let err = GatewayError::wallet_unavailable("tz1abc", "no signer configured");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "WALLET_UNAVAILABLE");
        assert_eq!(
            err.to_string(),
            "could not load wallet for tz1abc: no signer configured"
        );
    }

    #[test]
    fn test_chain_fault_propagates_text() {
        let err = GatewayError::from(anyhow::anyhow!("node returned 503"));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "CHAIN_ERROR");
        assert_eq!(err.to_string(), "node returned 503");
    }
}
