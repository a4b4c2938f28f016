//! Configuration for the gateway.

use std::time::Duration;

use clap::Parser;
use config::{Config as ConfigLoader, ConfigError, Environment, File, Source};
use serde::Deserialize;

/// Command-line flags. Any flag given overrides file and environment values.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "triton-gateway", version, about = "HTTP gateway for Triton Inference Server")]
pub struct CliArgs {
    /// Path to a configuration file (default: ./gateway.toml, optional).
    #[arg(long)]
    pub config: Option<String>,
    /// Name of the model being served.
    #[arg(short = 'm', long = "model")]
    pub model_name: Option<String>,
    /// Version of the model. Empty selects the latest version.
    #[arg(short = 'x', long = "model-version")]
    pub model_version: Option<String>,
    /// Triton gRPC address (host:port).
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(short = 't', long = "timeout")]
    pub timeout_secs: Option<u64>,
    /// HTTP listen host.
    #[arg(long)]
    pub host: Option<String>,
    /// HTTP listen port.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub backend: BackendConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Triton connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// gRPC address of the inference server, `host:port`.
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Upper bound on each backend call, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Model used by `/infer` when the form does not name one.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Empty means "latest version".
    #[serde(default)]
    pub version: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            version: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_backend_url() -> String {
    "localhost:8001".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_model_name() -> String {
    "simple".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file, environment variables and flags.
    ///
    /// Sources (in order of precedence):
    /// 1. Command-line flags
    /// 2. Environment variables (GATEWAY__SECTION__KEY format)
    /// 3. Config file (`--config`, or gateway.toml if present)
    /// 4. Built-in defaults
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name("gateway").required(false),
        };
        let env = Environment::with_prefix("GATEWAY")
            .separator("__")
            .try_parsing(true);

        Self::from_sources(args, file, env)
    }

    fn from_sources<F, E>(args: &CliArgs, file: F, env: E) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
        E: Source + Send + Sync + 'static,
    {
        let config = ConfigLoader::builder()
            .set_default("api.host", default_host())?
            .set_default("api.port", default_port() as i64)?
            .set_default("backend.url", default_backend_url())?
            .set_default("backend.timeout_secs", default_timeout() as i64)?
            .set_default("model.name", default_model_name())?
            .set_default("model.version", "")?
            .set_default("logging.level", default_log_level())?
            .add_source(file)
            .add_source(env)
            .set_override_option("api.host", args.host.clone())?
            .set_override_option("api.port", args.port.map(i64::from))?
            .set_override_option("backend.url", args.url.clone())?
            .set_override_option("backend.timeout_secs", args.timeout_secs.map(|t| t as i64))?
            .set_override_option("model.name", args.model_name.clone())?
            .set_override_option("model.version", args.model_version.clone())?
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::Message("backend.url must not be empty".to_string()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::Message("model.name must not be empty".to_string()));
        }
        Ok(())
    }
}
