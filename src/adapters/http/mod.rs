//! HTTP Adapter - Gateway Operation Routes
//!
//! One thin axum router over the five gateway operations. Handlers only
//! deserialize the request record, delegate, and serialize the response;
//! faults convert through `GatewayError: IntoResponse` so status, message,
//! and code reach the caller verbatim.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::GatewayError;
use crate::ports::chain_client::ChainClient;
use crate::usecases::account::{fetch_nonce, NonceRequest, NonceResponse};
use crate::usecases::allowances::{fetch_allowances, AllowanceResponse, AllowancesRequest};
use crate::usecases::approve::{approve_token, ApproveRequest, ApproveResponse};
use crate::usecases::balances::{fetch_balances, BalanceResponse, BalancesRequest};
use crate::usecases::poll::{poll_transaction, PollRequest, PollResponse};

/// Shared state: the one resolved chain client this instance serves.
#[derive(Clone)]
pub struct AppState {
    client: Arc<dyn ChainClient>,
}

/// Build the gateway router around a resolved chain client.
pub fn router(client: Arc<dyn ChainClient>) -> Router {
    let state = AppState { client };
    Router::new()
        .route("/nonce/:address", get(nonce))
        .route("/balances", post(balances))
        .route("/allowances", post(allowances))
        .route("/poll/:tx_hash", get(poll))
        .route("/approve", post(approve))
        .with_state(state)
}

async fn nonce(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<NonceResponse>, GatewayError> {
    let request = NonceRequest { address };
    Ok(Json(fetch_nonce(state.client.as_ref(), &request).await?))
}

async fn balances(
    State(state): State<AppState>,
    Json(request): Json<BalancesRequest>,
) -> Result<Json<BalanceResponse>, GatewayError> {
    Ok(Json(fetch_balances(state.client.as_ref(), &request).await?))
}

async fn allowances(
    State(state): State<AppState>,
    Json(request): Json<AllowancesRequest>,
) -> Result<Json<AllowanceResponse>, GatewayError> {
    Ok(Json(fetch_allowances(state.client.as_ref(), &request).await?))
}

async fn poll(
    State(state): State<AppState>,
    Path(tx_hash): Path<String>,
) -> Result<Json<PollResponse>, GatewayError> {
    let request = PollRequest { tx_hash };
    Ok(Json(poll_transaction(state.client.as_ref(), &request).await?))
}

async fn approve(
    State(state): State<AppState>,
    Json(request): Json<ApproveRequest>,
) -> Result<Json<ApproveResponse>, GatewayError> {
    Ok(Json(approve_token(state.client.as_ref(), &request).await?))
}
