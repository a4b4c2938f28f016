//! Triton Gateway - serves REST endpoints backed by Triton's gRPC API.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use triton_gateway::{api, AppState, CliArgs, Config, TritonBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Load configuration
    let config = Config::load(&args).map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check gateway.toml, GATEWAY__SECTION__KEY environment variables and flags.",
            e
        )
    })?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        backend = %config.backend.url,
        model = %config.model.name,
        version = %config.model.version,
        timeout_secs = config.backend.timeout_secs,
        "Starting triton-gateway {}",
        env!("CARGO_PKG_VERSION")
    );

    // Connect to Triton. Serving without a backend is not an option.
    let connect = TritonBackend::establish(&config.backend.url, config.backend.timeout());
    let backend = match connect.await {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!("Couldn't connect to endpoint {}: {}", config.backend.url, e);
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(config.clone(), Arc::new(backend)));
    let app = api::app(state);

    // Start server
    let addr = format!("{}:{}", config.api.host, config.api.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
