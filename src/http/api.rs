//! JSON API handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::explorer::{BalanceReply, UtxoReply};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    pub hex: Option<String>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.explorer.chain_summary().await?))
}

pub async fn blocks(
    State(state): State<AppState>,
    Path(count): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(state.explorer.recent_blocks(Some(&count)).await?))
}

pub async fn blocks_default(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(state.explorer.recent_blocks(None).await?))
}

/// Unknown hashes come back as 500 here while `/block/:hash` renders a 404.
/// The asymmetry is kept for compatibility with existing API clients.
pub async fn block(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.explorer.block(&hash).await?))
}

pub async fn balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<BalanceReply> {
    Json(state.explorer.balance(&address).await)
}

pub async fn utxos(State(state): State<AppState>, Path(address): Path<String>) -> Json<UtxoReply> {
    Json(state.explorer.utxos(&address).await)
}

pub async fn broadcast(
    State(state): State<AppState>,
    payload: Result<Json<BroadcastRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let hex = request
        .hex
        .ok_or_else(|| ApiError::bad_request("missing 'hex' field"))?;

    // Every broadcast failure is the caller's 400, node unreachable included.
    match state.explorer.broadcast(&hex).await {
        Ok(txid) => Ok(Json(json!({ "txid": txid }))),
        Err(e) => {
            tracing::info!(error = %e, kind = e.kind(), "Broadcast failed");
            Err(ApiError::bad_request(e.client_message()))
        }
    }
}
