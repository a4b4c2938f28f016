//! Model metadata, statistics and repository (load/unload) messages.

use serde::Serialize;

/// Request for `ModelMetadata`.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ModelMetadataRequest {
    /// Model name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Model version. Empty selects the server's version policy (latest).
    #[prost(string, tag = "2")]
    pub version: String,
}

/// Response for `ModelMetadata`.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ModelMetadataResponse {
    #[prost(string, tag = "1")]
    pub name: String,
    /// Versions of the model available on the server.
    #[prost(string, repeated, tag = "2")]
    pub versions: Vec<String>,
    /// Framework/backend serving the model (e.g. "tensorflow_graphdef").
    #[prost(string, tag = "3")]
    pub platform: String,
    #[prost(message, repeated, tag = "4")]
    pub inputs: Vec<model_metadata_response::TensorMetadata>,
    #[prost(message, repeated, tag = "5")]
    pub outputs: Vec<model_metadata_response::TensorMetadata>,
}

/// Nested message types for [`ModelMetadataResponse`].
pub mod model_metadata_response {
    use serde::Serialize;

    /// Signature of one input or output tensor.
    #[derive(Clone, PartialEq, prost::Message, Serialize)]
    pub struct TensorMetadata {
        #[prost(string, tag = "1")]
        pub name: String,
        /// Element datatype (e.g. "UINT8", "FP32", "BYTES").
        #[prost(string, tag = "2")]
        pub datatype: String,
        /// Shape; `-1` marks a variable-size dimension.
        #[prost(int64, repeated, tag = "3")]
        pub shape: Vec<i64>,
    }
}

/// Request for `ModelStatistics`.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ModelStatisticsRequest {
    /// Model name. Empty requests statistics for all models.
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub version: String,
}

/// Response for `ModelStatistics`.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ModelStatisticsResponse {
    #[prost(message, repeated, tag = "1")]
    pub model_stats: Vec<ModelStatistics>,
}

/// Statistics for one version of one model.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ModelStatistics {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub version: String,
    /// Timestamp of the last inference, milliseconds since epoch.
    #[prost(uint64, tag = "3")]
    pub last_inference: u64,
    /// Number of successful inferences (counting each batch element).
    #[prost(uint64, tag = "4")]
    pub inference_count: u64,
    /// Number of model executions (a batch counts once).
    #[prost(uint64, tag = "5")]
    pub execution_count: u64,
    #[prost(message, optional, tag = "6")]
    pub inference_stats: Option<InferStatistics>,
    #[prost(message, repeated, tag = "7")]
    pub batch_stats: Vec<InferBatchStatistics>,
}

/// Cumulative count and duration of one phase of inference.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct StatisticDuration {
    #[prost(uint64, tag = "1")]
    pub count: u64,
    /// Total duration in nanoseconds.
    #[prost(uint64, tag = "2")]
    pub ns: u64,
}

/// Inference statistics broken down by phase.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct InferStatistics {
    #[prost(message, optional, tag = "1")]
    pub success: Option<StatisticDuration>,
    #[prost(message, optional, tag = "2")]
    pub fail: Option<StatisticDuration>,
    #[prost(message, optional, tag = "3")]
    pub queue: Option<StatisticDuration>,
    #[prost(message, optional, tag = "4")]
    pub compute_input: Option<StatisticDuration>,
    #[prost(message, optional, tag = "5")]
    pub compute_infer: Option<StatisticDuration>,
    #[prost(message, optional, tag = "6")]
    pub compute_output: Option<StatisticDuration>,
    #[prost(message, optional, tag = "7")]
    pub cache_hit: Option<StatisticDuration>,
    #[prost(message, optional, tag = "8")]
    pub cache_miss: Option<StatisticDuration>,
}

/// Execution statistics for one batch size.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct InferBatchStatistics {
    #[prost(uint64, tag = "1")]
    pub batch_size: u64,
    #[prost(message, optional, tag = "2")]
    pub compute_input: Option<StatisticDuration>,
    #[prost(message, optional, tag = "3")]
    pub compute_infer: Option<StatisticDuration>,
    #[prost(message, optional, tag = "4")]
    pub compute_output: Option<StatisticDuration>,
}

/// Request for `RepositoryModelLoad`.
///
/// Only honored by servers started with explicit model control.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct RepositoryModelLoadRequest {
    /// Repository to load from. Empty searches all repositories.
    #[prost(string, tag = "1")]
    pub repository_name: String,
    #[prost(string, tag = "2")]
    pub model_name: String,
}

/// Response for `RepositoryModelLoad`.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct RepositoryModelLoadResponse {}

/// Request for `RepositoryModelUnload`.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct RepositoryModelUnloadRequest {
    #[prost(string, tag = "1")]
    pub repository_name: String,
    #[prost(string, tag = "2")]
    pub model_name: String,
}

/// Response for `RepositoryModelUnload`.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct RepositoryModelUnloadResponse {}
