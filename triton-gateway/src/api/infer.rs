//! Inference endpoint.
//!
//! The deployed model contract is bytes in, bytes out: the uploaded file is
//! sent verbatim as a one-dimensional `UINT8` tensor named `INPUT`, and the
//! tensor named `OUTPUT` is requested back.

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::post;
use axum::{Json, Router};
use triton_proto::{
    InferInputTensor, InferRequestedOutputTensor, ModelInferRequest, ModelInferResponse,
};
use uuid::Uuid;

use super::{call_backend, non_empty};
use crate::error::{Error, Result};
use crate::state::AppState;

/// Name of the model's input tensor.
pub const INPUT_TENSOR: &str = "INPUT";
/// Name of the model's output tensor.
pub const OUTPUT_TENSOR: &str = "OUTPUT";
/// Element type of the input tensor.
pub const INPUT_DATATYPE: &str = "UINT8";

/// Build the inference router.
///
/// Uploads are not size-capped at this layer.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/infer", post(infer).layer(DefaultBodyLimit::disable()))
}

/// Fields of the `/infer` multipart form.
#[derive(Debug, Default)]
struct InferForm {
    model: Option<String>,
    version: Option<String>,
    file: Option<Vec<u8>>,
}

impl InferForm {
    /// Read the whole form into memory. Unknown fields are skipped.
    async fn read(multipart: &mut Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "model" => form.model = Some(field.text().await?),
                "version" => form.version = Some(field.text().await?),
                "file" => form.file = Some(field.bytes().await?.to_vec()),
                other => tracing::debug!("Ignoring unexpected form field '{}'", other),
            }
        }

        Ok(form)
    }
}

/// Build the inference request for one uploaded payload.
///
/// The payload length is the tensor's only dimension.
pub fn build_infer_request(
    model_name: String,
    model_version: String,
    id: String,
    payload: Vec<u8>,
) -> ModelInferRequest {
    let input = InferInputTensor {
        name: INPUT_TENSOR.to_string(),
        datatype: INPUT_DATATYPE.to_string(),
        shape: vec![payload.len() as i64],
        ..Default::default()
    };
    let output = InferRequestedOutputTensor {
        name: OUTPUT_TENSOR.to_string(),
        ..Default::default()
    };

    ModelInferRequest {
        model_name,
        model_version,
        id,
        inputs: vec![input],
        outputs: vec![output],
        raw_input_contents: vec![payload],
        ..Default::default()
    }
}

/// POST /infer - Run the model on an uploaded file.
///
/// Form fields: `model` (defaults to the configured model), `version`
/// (defaults to the configured version), `file` (required).
async fn infer(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ModelInferResponse>> {
    let mut multipart = multipart?;
    let form = InferForm::read(&mut multipart).await?;

    let payload = form
        .file
        .ok_or_else(|| Error::InvalidRequest("file is required".to_string()))?;
    if payload.is_empty() {
        return Err(Error::InvalidRequest("file must not be empty".to_string()));
    }

    let model_name = non_empty(form.model).unwrap_or_else(|| state.config.model.name.clone());
    let model_version = form
        .version
        .unwrap_or_else(|| state.config.model.version.clone());
    let id = Uuid::new_v4().to_string();

    tracing::debug!(
        id = %id,
        model = %model_name,
        version = %model_version,
        bytes = payload.len(),
        "Inference request"
    );

    let request = build_infer_request(model_name, model_version, id, payload);
    let response = call_backend(&state, "ModelInfer", state.backend.infer(request)).await?;

    Ok(Json(response))
}
