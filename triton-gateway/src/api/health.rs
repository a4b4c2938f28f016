//! Health endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use triton_proto::{ServerLiveRequest, ServerReadyRequest};

use super::call_backend;
use crate::error::Result;
use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health))
        .route("/liveness", get(liveness))
        .route("/readiness", get(readiness))
}

/// GET / - The gateway itself is up. Does not touch the backend.
pub async fn health() -> Json<bool> {
    Json(true)
}

/// GET /liveness - Triton's liveness.
async fn liveness(State(state): State<Arc<AppState>>) -> Result<Json<bool>> {
    let response = call_backend(
        &state,
        "ServerLive",
        state.backend.server_live(ServerLiveRequest {}),
    )
    .await?;

    Ok(Json(response.live))
}

/// GET /readiness - Triton's readiness.
async fn readiness(State(state): State<Arc<AppState>>) -> Result<Json<bool>> {
    let response = call_backend(
        &state,
        "ServerReady",
        state.backend.server_ready(ServerReadyRequest {}),
    )
    .await?;

    Ok(Json(response.ready))
}
