//! HTTP access logging.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Middleware that logs HTTP requests at INFO level.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let response = next.run(request).await;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_success() {
        tracing::info!(
            method = %method,
            path = %path,
            query = query.as_deref().unwrap_or(""),
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "HTTP request"
        );
    } else {
        tracing::warn!(
            method = %method,
            path = %path,
            query = query.as_deref().unwrap_or(""),
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "HTTP request failed"
        );
    }

    response
}
