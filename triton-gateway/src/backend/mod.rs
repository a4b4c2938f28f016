//! Inference backend abstraction.
//!
//! Handlers talk to the inference server only through the `InferenceBackend`
//! trait, one method per RPC. The production implementation is
//! [`TritonBackend`]; tests substitute their own.

mod triton;

pub use triton::TritonBackend;

use async_trait::async_trait;
use triton_proto::{
    ModelInferRequest, ModelInferResponse, ModelMetadataRequest, ModelMetadataResponse,
    ModelStatisticsRequest, ModelStatisticsResponse, RepositoryModelLoadRequest,
    RepositoryModelLoadResponse, RepositoryModelUnloadRequest, RepositoryModelUnloadResponse,
    ServerLiveRequest, ServerLiveResponse, ServerReadyRequest, ServerReadyResponse,
};

use crate::error::Result;

/// The RPC surface of the inference server used by the gateway.
///
/// Implementations must be safe to call from many requests at once. Each call
/// issues exactly one RPC; dropping the returned future abandons it.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Liveness probe.
    async fn server_live(&self, request: ServerLiveRequest) -> Result<ServerLiveResponse>;

    /// Readiness probe.
    async fn server_ready(&self, request: ServerReadyRequest) -> Result<ServerReadyResponse>;

    /// Metadata for a model, keyed by name and version.
    async fn model_metadata(&self, request: ModelMetadataRequest) -> Result<ModelMetadataResponse>;

    /// Inference statistics for a model, keyed by name and version.
    async fn model_statistics(
        &self,
        request: ModelStatisticsRequest,
    ) -> Result<ModelStatisticsResponse>;

    /// Load (or reload) a model by name.
    async fn load_model(
        &self,
        request: RepositoryModelLoadRequest,
    ) -> Result<RepositoryModelLoadResponse>;

    /// Unload a model by name.
    async fn unload_model(
        &self,
        request: RepositoryModelUnloadRequest,
    ) -> Result<RepositoryModelUnloadResponse>;

    /// Run inference.
    async fn infer(&self, request: ModelInferRequest) -> Result<ModelInferResponse>;
}
