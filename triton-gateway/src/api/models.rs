//! Model endpoints: metadata, statistics, load and unload.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use triton_proto::{
    ModelMetadataRequest, ModelMetadataResponse, ModelStatisticsRequest, ModelStatisticsResponse,
    RepositoryModelLoadRequest, RepositoryModelLoadResponse, RepositoryModelUnloadRequest,
    RepositoryModelUnloadResponse,
};

use super::{call_backend, non_empty};
use crate::error::{Error, Result};
use crate::state::AppState;

/// Build the models router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/model-metadata", get(model_metadata))
        .route("/model-stats", get(model_stats))
        .route("/model-load", post(model_load))
        .route("/model-unload", post(model_unload))
}

/// Query parameters naming a model.
#[derive(Debug, Default, Deserialize)]
pub struct ModelQuery {
    #[serde(default)]
    pub model: Option<String>,
    /// Empty or absent selects the latest version.
    #[serde(default)]
    pub version: Option<String>,
}

impl ModelQuery {
    /// Split into (name, version), rejecting a missing name.
    fn into_parts(self) -> Result<(String, String)> {
        let model = non_empty(self.model)
            .ok_or_else(|| Error::InvalidRequest("model is required".to_string()))?;
        Ok((model, self.version.unwrap_or_default()))
    }
}

/// GET /model-metadata?model=&version= - Model metadata.
async fn model_metadata(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModelQuery>,
) -> Result<Json<ModelMetadataResponse>> {
    let (name, version) = query.into_parts()?;
    tracing::debug!("Model metadata request for {} (version '{}')", name, version);

    let request = ModelMetadataRequest { name, version };
    let response = call_backend(
        &state,
        "ModelMetadata",
        state.backend.model_metadata(request),
    )
    .await?;

    Ok(Json(response))
}

/// GET /model-stats?model=&version= - Model inference statistics.
async fn model_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModelQuery>,
) -> Result<Json<ModelStatisticsResponse>> {
    let (name, version) = query.into_parts()?;
    tracing::debug!("Model statistics request for {} (version '{}')", name, version);

    let request = ModelStatisticsRequest { name, version };
    let response = call_backend(
        &state,
        "ModelStatistics",
        state.backend.model_statistics(request),
    )
    .await?;

    Ok(Json(response))
}

/// POST /model-load?model= - Load a model.
///
/// Only effective when Triton runs with explicit model control.
async fn model_load(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModelQuery>,
) -> Result<Json<RepositoryModelLoadResponse>> {
    let (model_name, _) = query.into_parts()?;
    tracing::info!("Loading model {}", model_name);

    let request = RepositoryModelLoadRequest {
        model_name,
        ..Default::default()
    };
    let response = call_backend(&state, "RepositoryModelLoad", state.backend.load_model(request))
        .await?;

    Ok(Json(response))
}

/// POST /model-unload?model= - Unload a model.
async fn model_unload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModelQuery>,
) -> Result<Json<RepositoryModelUnloadResponse>> {
    let (model_name, _) = query.into_parts()?;
    tracing::info!("Unloading model {}", model_name);

    let request = RepositoryModelUnloadRequest {
        model_name,
        ..Default::default()
    };
    let response = call_backend(
        &state,
        "RepositoryModelUnload",
        state.backend.unload_model(request),
    )
    .await?;

    Ok(Json(response))
}
