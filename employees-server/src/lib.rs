//! employees-server: HTTP API for employee records
//!
//! Employees reference a fixed city lookup table. Storage is PostgreSQL
//! (or in-memory for tests), validation runs before every write, and the
//! API answers with JSON everywhere.

pub mod db;
pub mod http;
pub mod models;
pub mod validation;

pub use db::{DatabaseConfig, MemoryStore, PgStore, RetryPolicy, Storage, StoreError};
pub use http::{
    build_router, open_postgres, run_server, AppState, ResponseMode, ServerConfig, ServerError,
};
pub use models::{City, Employee};
