//! Test helpers: a recording in-memory backend and request builders.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tonic::Status;
use triton_gateway::config::{ApiConfig, BackendConfig, LoggingConfig, ModelConfig};
use triton_gateway::{api, AppState, Config, InferenceBackend, Result};
use triton_proto::{
    model_metadata_response::TensorMetadata, InferOutputTensor, ModelInferRequest,
    ModelInferResponse, ModelMetadataRequest, ModelMetadataResponse, ModelStatistics,
    ModelStatisticsRequest, ModelStatisticsResponse, RepositoryModelLoadRequest,
    RepositoryModelLoadResponse, RepositoryModelUnloadRequest, RepositoryModelUnloadResponse,
    ServerLiveRequest, ServerLiveResponse, ServerReadyRequest, ServerReadyResponse,
};

pub const BOUNDARY: &str = "gateway-test-boundary";

/// In-memory stand-in for Triton.
///
/// Counts every call, remembers the last request of each kind, and can be
/// told to answer slowly or with an error status.
pub struct MockBackend {
    pub live: bool,
    pub ready: bool,
    /// Models the mock knows about. Others produce NOT_FOUND.
    pub models: Vec<String>,
    calls: AtomicUsize,
    completed: AtomicUsize,
    delay: Mutex<Duration>,
    failure: Mutex<Option<Status>>,
    loaded: Mutex<HashSet<String>>,
    last_metadata: Mutex<Option<ModelMetadataRequest>>,
    last_statistics: Mutex<Option<ModelStatisticsRequest>>,
    last_infer: Mutex<Option<ModelInferRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            live: true,
            ready: false,
            models: vec!["simple".to_string()],
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            delay: Mutex::new(Duration::ZERO),
            failure: Mutex::new(None),
            loaded: Mutex::new(HashSet::new()),
            last_metadata: Mutex::new(None),
            last_statistics: Mutex::new(None),
            last_infer: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls that ran to completion (not cancelled by the gateway).
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn fail_with(&self, status: Status) {
        *self.failure.lock().unwrap() = Some(status);
    }

    pub fn is_loaded(&self, model: &str) -> bool {
        self.loaded.lock().unwrap().contains(model)
    }

    pub fn last_metadata(&self) -> Option<ModelMetadataRequest> {
        self.last_metadata.lock().unwrap().clone()
    }

    pub fn last_statistics(&self) -> Option<ModelStatisticsRequest> {
        self.last_statistics.lock().unwrap().clone()
    }

    pub fn last_infer(&self) -> Option<ModelInferRequest> {
        self.last_infer.lock().unwrap().clone()
    }

    /// Common prologue for every RPC: count, wait, maybe fail.
    async fn begin(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(status) => Err(status.into()),
            None => Ok(()),
        }
    }

    fn check_model(&self, name: &str) -> Result<()> {
        if self.models.iter().any(|m| m == name) {
            Ok(())
        } else {
            let message = format!("Request for unknown model: '{}' is not found", name);
            Err(Status::not_found(message).into())
        }
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn server_live(&self, _request: ServerLiveRequest) -> Result<ServerLiveResponse> {
        self.begin().await?;
        Ok(ServerLiveResponse { live: self.live })
    }

    async fn server_ready(&self, _request: ServerReadyRequest) -> Result<ServerReadyResponse> {
        self.begin().await?;
        Ok(ServerReadyResponse { ready: self.ready })
    }

    async fn model_metadata(&self, request: ModelMetadataRequest) -> Result<ModelMetadataResponse> {
        *self.last_metadata.lock().unwrap() = Some(request.clone());
        self.begin().await?;
        self.check_model(&request.name)?;
        Ok(ModelMetadataResponse {
            name: request.name,
            versions: vec!["1".to_string()],
            platform: "tensorflow_graphdef".to_string(),
            inputs: vec![TensorMetadata {
                name: "INPUT".to_string(),
                datatype: "UINT8".to_string(),
                shape: vec![-1],
            }],
            outputs: vec![TensorMetadata {
                name: "OUTPUT".to_string(),
                datatype: "UINT8".to_string(),
                shape: vec![-1],
            }],
        })
    }

    async fn model_statistics(
        &self,
        request: ModelStatisticsRequest,
    ) -> Result<ModelStatisticsResponse> {
        *self.last_statistics.lock().unwrap() = Some(request.clone());
        self.begin().await?;
        self.check_model(&request.name)?;
        Ok(ModelStatisticsResponse {
            model_stats: vec![ModelStatistics {
                name: request.name,
                version: "1".to_string(),
                inference_count: 42,
                execution_count: 40,
                ..Default::default()
            }],
        })
    }

    async fn load_model(
        &self,
        request: RepositoryModelLoadRequest,
    ) -> Result<RepositoryModelLoadResponse> {
        self.begin().await?;
        self.check_model(&request.model_name)?;
        // Loading an already-loaded model is a reload and still succeeds.
        self.loaded.lock().unwrap().insert(request.model_name);
        Ok(RepositoryModelLoadResponse {})
    }

    async fn unload_model(
        &self,
        request: RepositoryModelUnloadRequest,
    ) -> Result<RepositoryModelUnloadResponse> {
        self.begin().await?;
        self.loaded.lock().unwrap().remove(&request.model_name);
        Ok(RepositoryModelUnloadResponse {})
    }

    /// Echoes the input back as OUTPUT, reversed.
    async fn infer(&self, request: ModelInferRequest) -> Result<ModelInferResponse> {
        *self.last_infer.lock().unwrap() = Some(request.clone());
        self.begin().await?;
        self.check_model(&request.model_name)?;

        let mut output = request.raw_input_contents.first().cloned().unwrap_or_default();
        output.reverse();
        Ok(ModelInferResponse {
            model_name: request.model_name,
            model_version: "1".to_string(),
            id: request.id,
            outputs: vec![InferOutputTensor {
                name: "OUTPUT".to_string(),
                datatype: "UINT8".to_string(),
                shape: vec![output.len() as i64],
                ..Default::default()
            }],
            raw_output_contents: vec![output],
            ..Default::default()
        })
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig::default(),
        backend: BackendConfig {
            url: "localhost:8001".to_string(),
            timeout_secs: 1,
        },
        model: ModelConfig {
            name: "simple".to_string(),
            version: String::new(),
        },
        logging: LoggingConfig::default(),
    }
}

/// Gateway app wired to `backend` with the given per-request timeout.
pub fn test_app(backend: Arc<MockBackend>, timeout: Duration) -> Router {
    let state = AppState {
        config: test_config(),
        backend: backend as Arc<dyn InferenceBackend>,
        request_timeout: timeout,
    };
    api::app(Arc::new(state))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart/form-data body. `file` fields are sent as file uploads.
pub fn multipart_request(uri: &str, fields: &[(&str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        if *name == "file" {
            body.extend_from_slice(
                b"Content-Disposition: form-data; name=\"file\"; filename=\"input.bin\"\r\n",
            );
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        } else {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            );
        }
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
