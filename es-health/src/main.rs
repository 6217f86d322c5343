//! Elasticsearch Health Check Entry Point
//!
//! Connects to the configured Elasticsearch nodes through `es-client` and prints
//! the cluster health as JSON. Exits non-zero if the cluster cannot be reached.

use std::env;
use std::time::Duration;

use dotenv::dotenv;
use es_client::{ClientConfig, RequestOptions, SearchClient, SearchClientError};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default Elasticsearch URL.
const DEFAULT_ELASTICSEARCH_URLS: &str = "http://localhost:9200";

/// Default per-call timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur while running the health check.
#[derive(Error, Debug)]
enum HealthCheckError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search client error.
    #[error("Search client error: {0}")]
    ClientError(#[from] SearchClientError),

    /// Failed to render the health report.
    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),
}

impl HealthCheckError {
    fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("es_health=info,es_client=info"));

    let json_logs = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "es-health",
        service_version = env!("CARGO_PKG_VERSION"),
        json_logs,
        "Tracing initialized"
    );
}

/// Build the client configuration from environment variables.
///
/// # Environment Variables
///
/// - `ELASTICSEARCH_URLS`: Comma-separated node addresses (default: http://localhost:9200)
/// - `ELASTICSEARCH_TIMEOUT_SECS`: Per-call timeout in seconds (default: 10)
fn load_config() -> Result<(ClientConfig, Duration), HealthCheckError> {
    let urls = env::var("ELASTICSEARCH_URLS")
        .unwrap_or_else(|_| DEFAULT_ELASTICSEARCH_URLS.to_string());
    let addresses: Vec<String> = urls
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if addresses.is_empty() {
        return Err(HealthCheckError::config(
            "ELASTICSEARCH_URLS must list at least one address",
        ));
    }

    let timeout_secs = match env::var("ELASTICSEARCH_TIMEOUT_SECS") {
        Ok(raw) => raw.parse::<u64>().map_err(|e| {
            HealthCheckError::config(format!("Invalid ELASTICSEARCH_TIMEOUT_SECS '{}': {}", raw, e))
        })?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    let timeout = Duration::from_secs(timeout_secs);
    Ok((ClientConfig::new(addresses).with_request_timeout(timeout), timeout))
}

async fn run() -> Result<(), HealthCheckError> {
    let (config, timeout) = load_config()?;
    info!(addresses = ?config.addresses, timeout_secs = timeout.as_secs(), "Connecting");

    let client = SearchClient::connect(config).await?;
    let health = client
        .cluster_health(&RequestOptions::none().with_timeout(timeout))
        .await?;

    info!(
        cluster_name = %health.cluster_name,
        status = %health.status,
        nodes = health.number_of_nodes,
        "Cluster health retrieved"
    );
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), HealthCheckError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    match run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "Health check failed");
            Err(e)
        }
    }
}
