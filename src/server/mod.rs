//! HTTP server module
//!
//! Provides the Axum-based HTTP server for serving metrics.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::collector::{JmxClient, RetryConfig};
use crate::config::Config;
use crate::transformer::TransformEngine;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// JMX HTTP client
    pub client: Arc<JmxClient>,
    /// Translation engine holding the process-wide name registry
    pub engine: TransformEngine,
    /// Fetch retry policy
    pub retry: RetryConfig,
}

impl AppState {
    /// Build the shared state from configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn from_config(config: Config) -> Result<Self> {
        let client = JmxClient::new(config.hadoop.timeout_ms)?;
        let engine = TransformEngine::from_config(&config.naming);
        let retry = RetryConfig::with_max_retries(config.hadoop.max_retries);

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
            engine,
            retry,
        })
    }
}

/// Build the router for the given state
pub fn router(state: AppState) -> Router {
    let metrics_path = state.config.server.path.clone();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(&metrics_path, get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
///
/// # Arguments
/// * `config` - Application configuration
///
/// # Errors
/// Returns an error if the server fails to start
pub async fn run(config: Config) -> Result<()> {
    let bind_address = config.server.bind_address.clone();
    let port = config.server.port;
    let metrics_path = config.server.path.clone();

    let state = AppState::from_config(config)?;
    let app = router(state);

    // "localhost" is accepted besides plain IP addresses
    let bind_addr: std::net::IpAddr = if bind_address == "localhost" {
        std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST)
    } else {
        bind_address
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind_address '{}': {}. Use an IP address (e.g., '0.0.0.0', '127.0.0.1') or 'localhost'.", bind_address, e))?
    };
    let addr = SocketAddr::from((bind_addr, port));
    info!(address = %addr, metrics_path = %metrics_path, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
