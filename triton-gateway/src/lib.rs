//! Triton Gateway - HTTP front end for a Triton Inference Server.
//!
//! Exposes REST endpoints and reissues each request as one gRPC call on a
//! shared, long-lived connection.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use crate::backend::{InferenceBackend, TritonBackend};
pub use crate::config::{CliArgs, Config};
pub use crate::error::{Error, Result};
pub use crate::state::AppState;
