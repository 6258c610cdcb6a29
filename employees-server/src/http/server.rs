//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Legacy status mapping (optional)
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::error::collapse_error_status;
use super::routes;
use crate::db::{ConnectError, DatabaseConfig, PgStore, RetryPolicy, Storage, StoreError};

/// How errors and created records are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// 400/404/405/500 per error kind; POST echoes the generated id
    #[default]
    Standard,
    /// Every error is a 500 and POST echoes `id: 0`, like the original service
    Legacy,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    pub response_mode: ResponseMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            response_mode: ResponseMode::Standard,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub response_mode: ResponseMode,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, response_mode: ResponseMode) -> Self {
        Self {
            store,
            response_mode,
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let legacy = state.response_mode == ResponseMode::Legacy;

    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::employees::router())
        .merge(routes::cities::router());

    if legacy {
        app = app.layer(middleware::map_response(collapse_error_status));
    }

    app.layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Connect to PostgreSQL and bootstrap the schema.
///
/// Must finish before the listener binds; either failure is fatal.
pub async fn open_postgres(
    config: &DatabaseConfig,
    policy: &RetryPolicy,
) -> Result<PgStore, ServerError> {
    let store = PgStore::connect(config, policy).await?;
    store.init().await?;
    Ok(store)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = open_postgres(&DatabaseConfig::from_env()?, &RetryPolicy::default()).await?;
/// run_server(Arc::new(store), ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: Arc<dyn Storage>, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        backend = store.backend(),
        mode = ?config.response_mode,
        "Storage ready"
    );
    let app = build_router(AppState::new(store, config.response_mode));

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to connect to database: {0}")]
    Connect(#[from] ConnectError),

    #[error("Failed to initialize database schema: {0}")]
    Store(#[from] StoreError),
}
