//! Triton Protocol Types
//!
//! Message types and typed client for the subset of Triton's
//! `inference.GRPCInferenceService` used by the gateway. Messages carry both
//! their protobuf encoding (prost) and a JSON projection (serde) so the same
//! value can be returned to HTTP callers unchanged.

pub mod client;
pub mod infer;
mod json;
pub mod model;
pub mod server;

pub use client::GrpcInferenceServiceClient;
pub use infer::{
    infer_parameter, InferInputTensor, InferOutputTensor, InferParameter,
    InferRequestedOutputTensor, InferTensorContents, ModelInferRequest, ModelInferResponse,
};
pub use model::{
    model_metadata_response, InferBatchStatistics, InferStatistics, ModelMetadataRequest,
    ModelMetadataResponse, ModelStatistics, ModelStatisticsRequest, ModelStatisticsResponse,
    RepositoryModelLoadRequest, RepositoryModelLoadResponse, RepositoryModelUnloadRequest,
    RepositoryModelUnloadResponse, StatisticDuration,
};
pub use server::{ServerLiveRequest, ServerLiveResponse, ServerReadyRequest, ServerReadyResponse};

/// Fully-qualified gRPC service name.
pub const SERVICE_NAME: &str = "inference.GRPCInferenceService";
