//! HTTP API.
//!
//! Every handler follows the same shape: extract and validate inputs, build
//! one backend request, run it through [`call_backend`] under the request's
//! timeout, and return the response as JSON.

pub mod health;
pub mod infer;
pub mod models;

use std::future::Future;
use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::logging::request_logger;
use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(models::router())
        .merge(infer::router())
}

/// Build the complete application: routes, middleware and state.
pub fn app(state: Arc<AppState>) -> Router {
    router()
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run one backend call bounded by the request timeout.
///
/// On timeout the call future is dropped, which cancels the RPC for this
/// request only; the shared connection stays open for everyone else.
pub(crate) async fn call_backend<T, F>(state: &AppState, rpc: &'static str, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tracing::debug!(rpc, "Calling backend");

    let result = match tokio::time::timeout(state.request_timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(state.request_timeout)),
    };

    match &result {
        Ok(_) => {}
        Err(Error::Timeout(timeout)) => {
            tracing::warn!(
                rpc,
                kind = "timeout",
                timeout_ms = timeout.as_millis() as u64,
                "Backend call timed out"
            );
        }
        Err(e) => {
            let code = match e {
                Error::Backend(status) => format!("{:?}", status.code()),
                _ => String::new(),
            };
            tracing::warn!(rpc, kind = "rpc_error", code = %code, "Backend call failed: {}", e);
        }
    }

    result
}

/// Treat an absent or blank parameter as missing.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("simple".into())), Some("simple".into()));
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(None), None);
    }
}
