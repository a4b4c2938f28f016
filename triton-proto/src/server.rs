//! Server health probes.

use serde::Serialize;

/// Request for `ServerLive`.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct ServerLiveRequest {}

/// Response for `ServerLive`.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct ServerLiveResponse {
    /// True if the inference server is live.
    #[prost(bool, tag = "1")]
    pub live: bool,
}

/// Request for `ServerReady`.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct ServerReadyRequest {}

/// Response for `ServerReady`.
#[derive(Clone, Copy, PartialEq, prost::Message, Serialize)]
pub struct ServerReadyResponse {
    /// True if the inference server is ready to accept inference requests.
    #[prost(bool, tag = "1")]
    pub ready: bool,
}
