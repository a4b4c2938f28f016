//! Error types for the gateway.

use std::time::Duration;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced by gateway handlers and backend setup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input is missing or malformed. No backend call was made.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend answered the RPC with an error status.
    #[error("Backend error ({:?}): {}", .0.code(), .0.message())]
    Backend(tonic::Status),

    /// The backend did not answer within the request's timeout.
    #[error("Backend did not respond within {0:?}")]
    Timeout(Duration),

    /// The connection to the backend could not be established.
    #[error("Backend connection failed: {0}")]
    Connection(String),
}

impl Error {
    /// Short machine-readable kind, used in response bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidRequest(_) => "invalid_request",
            Error::Backend(_) | Error::Connection(_) => "backend_error",
            Error::Timeout(_) => "backend_timeout",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Backend(_) | Error::Connection(_) => StatusCode::BAD_GATEWAY,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Error::Backend(status)
    }
}

impl From<MultipartError> for Error {
    fn from(err: MultipartError) -> Self {
        Error::InvalidRequest(format!("malformed multipart body: {}", err.body_text()))
    }
}

impl From<MultipartRejection> for Error {
    fn from(rejection: MultipartRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string()
            }
        }));

        (self.status_code(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
