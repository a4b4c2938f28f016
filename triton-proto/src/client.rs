//! Typed gRPC client for `inference.GRPCInferenceService`.
//!
//! Equivalent to what tonic-build emits for the service definition, limited to
//! the methods the gateway calls. Each method issues one unary call.

use tonic::codegen::{http, Body, Bytes, GrpcMethod, StdError};
use tonic::{IntoRequest, Request, Response, Status};

use crate::infer::{ModelInferRequest, ModelInferResponse};
use crate::model::{
    ModelMetadataRequest, ModelMetadataResponse, ModelStatisticsRequest, ModelStatisticsResponse,
    RepositoryModelLoadRequest, RepositoryModelLoadResponse, RepositoryModelUnloadRequest,
    RepositoryModelUnloadResponse,
};
use crate::server::{ServerLiveRequest, ServerLiveResponse, ServerReadyRequest, ServerReadyResponse};
use crate::SERVICE_NAME;

macro_rules! rpc_path {
    ($method:literal) => {
        concat!("/inference.GRPCInferenceService/", $method)
    };
}

/// Client for Triton's inference service.
///
/// Cloning is cheap: clones share the underlying transport, which multiplexes
/// concurrent calls over one HTTP/2 connection.
#[derive(Debug, Clone)]
pub struct GrpcInferenceServiceClient<T> {
    inner: tonic::client::Grpc<T>,
}

impl<T> GrpcInferenceServiceClient<T>
where
    T: tonic::client::GrpcService<tonic::body::BoxBody>,
    T::Error: Into<StdError>,
    T::ResponseBody: Body<Data = Bytes> + Send + 'static,
    <T::ResponseBody as Body>::Error: Into<StdError> + Send,
{
    pub fn new(inner: T) -> Self {
        Self {
            inner: tonic::client::Grpc::new(inner),
        }
    }

    async fn unary<Req, Resp>(
        &mut self,
        mut request: Request<Req>,
        method: &'static str,
        path: &'static str,
    ) -> Result<Response<Resp>, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {}", e.into())))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static(path);
        request
            .extensions_mut()
            .insert(GrpcMethod::new(SERVICE_NAME, method));
        self.inner.unary(request, path, codec).await
    }

    /// Check liveness of the inference server.
    pub async fn server_live(
        &mut self,
        request: impl IntoRequest<ServerLiveRequest>,
    ) -> Result<Response<ServerLiveResponse>, Status> {
        self.unary(request.into_request(), "ServerLive", rpc_path!("ServerLive"))
            .await
    }

    /// Check readiness of the inference server.
    pub async fn server_ready(
        &mut self,
        request: impl IntoRequest<ServerReadyRequest>,
    ) -> Result<Response<ServerReadyResponse>, Status> {
        self.unary(request.into_request(), "ServerReady", rpc_path!("ServerReady"))
            .await
    }

    /// Get model metadata.
    pub async fn model_metadata(
        &mut self,
        request: impl IntoRequest<ModelMetadataRequest>,
    ) -> Result<Response<ModelMetadataResponse>, Status> {
        self.unary(request.into_request(), "ModelMetadata", rpc_path!("ModelMetadata"))
            .await
    }

    /// Get cumulative inference statistics for a model.
    pub async fn model_statistics(
        &mut self,
        request: impl IntoRequest<ModelStatisticsRequest>,
    ) -> Result<Response<ModelStatisticsResponse>, Status> {
        self.unary(
            request.into_request(),
            "ModelStatistics",
            rpc_path!("ModelStatistics"),
        )
        .await
    }

    /// Load or reload a model from a repository.
    pub async fn repository_model_load(
        &mut self,
        request: impl IntoRequest<RepositoryModelLoadRequest>,
    ) -> Result<Response<RepositoryModelLoadResponse>, Status> {
        self.unary(
            request.into_request(),
            "RepositoryModelLoad",
            rpc_path!("RepositoryModelLoad"),
        )
        .await
    }

    /// Unload a model.
    pub async fn repository_model_unload(
        &mut self,
        request: impl IntoRequest<RepositoryModelUnloadRequest>,
    ) -> Result<Response<RepositoryModelUnloadResponse>, Status> {
        self.unary(
            request.into_request(),
            "RepositoryModelUnload",
            rpc_path!("RepositoryModelUnload"),
        )
        .await
    }

    /// Perform inference using a specific model.
    pub async fn model_infer(
        &mut self,
        request: impl IntoRequest<ModelInferRequest>,
    ) -> Result<Response<ModelInferResponse>, Status> {
        self.unary(request.into_request(), "ModelInfer", rpc_path!("ModelInfer"))
            .await
    }
}
