//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown
//! - JSON error envelopes (`{"error": ...}`)

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{
    build_router, open_postgres, run_server, AppState, ResponseMode, ServerConfig, ServerError,
};
