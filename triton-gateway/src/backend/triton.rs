//! Triton gRPC backend.

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use triton_proto::{
    GrpcInferenceServiceClient, ModelInferRequest, ModelInferResponse, ModelMetadataRequest,
    ModelMetadataResponse, ModelStatisticsRequest, ModelStatisticsResponse,
    RepositoryModelLoadRequest, RepositoryModelLoadResponse, RepositoryModelUnloadRequest,
    RepositoryModelUnloadResponse, ServerLiveRequest, ServerLiveResponse, ServerReadyRequest,
    ServerReadyResponse,
};

use super::InferenceBackend;
use crate::error::{Error, Result};

/// Connection to a Triton server over plaintext gRPC.
///
/// Holds one HTTP/2 channel for the life of the process. The channel
/// multiplexes concurrent calls, so each call works on a cheap clone of the
/// client instead of serializing on a lock.
pub struct TritonBackend {
    client: GrpcInferenceServiceClient<Channel>,
    timeout: Duration,
}

impl TritonBackend {
    /// Open the connection to `address` (`host:port`).
    ///
    /// Fails if the server cannot be reached within `timeout`. There is no
    /// retry; callers treat failure as fatal.
    pub async fn establish(address: &str, timeout: Duration) -> Result<Self> {
        let uri = endpoint_uri(address)?;
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| Error::Connection(format!("invalid address {}: {}", address, e)))?
            .connect_timeout(timeout);

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| Error::Connection(format!("couldn't connect to {}: {}", uri, e)))?;

        tracing::info!("Connected to Triton at {}", uri);

        Ok(Self {
            client: GrpcInferenceServiceClient::new(channel),
            timeout,
        })
    }

    /// Wrap a message, propagating the deadline to the server as `grpc-timeout`.
    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        request.set_timeout(self.timeout);
        request
    }

    fn finish<T>(&self, result: std::result::Result<tonic::Response<T>, Status>) -> Result<T> {
        result
            .map(tonic::Response::into_inner)
            .map_err(|status| call_error(status, self.timeout))
    }
}

/// Classify a failed call.
///
/// An expired deadline surfaces as `DEADLINE_EXCEEDED` from the server or as
/// `CANCELLED` from the channel's own timer. The gateway only ever cancels a
/// call on timeout, so both mean the request ran out of time.
fn call_error(status: Status, timeout: Duration) -> Error {
    match status.code() {
        Code::DeadlineExceeded | Code::Cancelled => {
            tracing::debug!(
                code = ?status.code(),
                "Backend deadline expired: {}",
                status.message()
            );
            Error::Timeout(timeout)
        }
        _ => Error::Backend(status),
    }
}

/// Turn a `host:port` address into a URI tonic accepts.
fn endpoint_uri(address: &str) -> Result<String> {
    let address = address.trim();
    if address.is_empty() {
        return Err(Error::Connection("backend address is empty".to_string()));
    }
    if address.starts_with("http://") || address.starts_with("https://") {
        Ok(address.to_string())
    } else {
        Ok(format!("http://{}", address))
    }
}

#[async_trait]
impl InferenceBackend for TritonBackend {
    async fn server_live(&self, request: ServerLiveRequest) -> Result<ServerLiveResponse> {
        let response = self.client.clone().server_live(self.request(request)).await;
        self.finish(response)
    }

    async fn server_ready(&self, request: ServerReadyRequest) -> Result<ServerReadyResponse> {
        let response = self.client.clone().server_ready(self.request(request)).await;
        self.finish(response)
    }

    async fn model_metadata(&self, request: ModelMetadataRequest) -> Result<ModelMetadataResponse> {
        let response = self.client.clone().model_metadata(self.request(request)).await;
        self.finish(response)
    }

    async fn model_statistics(
        &self,
        request: ModelStatisticsRequest,
    ) -> Result<ModelStatisticsResponse> {
        let response = self.client.clone().model_statistics(self.request(request)).await;
        self.finish(response)
    }

    async fn load_model(
        &self,
        request: RepositoryModelLoadRequest,
    ) -> Result<RepositoryModelLoadResponse> {
        let response = self.client.clone().repository_model_load(self.request(request)).await;
        self.finish(response)
    }

    async fn unload_model(
        &self,
        request: RepositoryModelUnloadRequest,
    ) -> Result<RepositoryModelUnloadResponse> {
        let response = self.client.clone().repository_model_unload(self.request(request)).await;
        self.finish(response)
    }

    async fn infer(&self, request: ModelInferRequest) -> Result<ModelInferResponse> {
        let response = self.client.clone().model_infer(self.request(request)).await;
        self.finish(response)
    }
}
