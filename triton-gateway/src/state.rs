//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::InferenceBackend;
use crate::config::Config;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    /// Connection to the inference server, shared by every request.
    pub backend: Arc<dyn InferenceBackend>,
    /// Upper bound on each backend call.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn InferenceBackend>) -> Self {
        let request_timeout = config.backend.timeout();
        Self {
            config,
            backend,
            request_timeout,
        }
    }
}
