//! Storage layer - backends, connection lifecycle and schema bootstrap
//!
//! # Design Principles
//!
//! - One `Storage` trait, picked at construction time (`PgStore` or `MemoryStore`)
//! - The store is injected into the HTTP layer, never a global
//! - Startup connects through a bounded retry state machine
//! - Seeding runs in one transaction (all-or-nothing)

pub mod config;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use config::{ConfigError, DatabaseConfig};
pub use memory::MemoryStore;
pub use pool::{
    connect_with_retry, create_pool, ConnectError, ConnectState, RetryPolicy, DEFAULT_MAX_ATTEMPTS,
};
pub use postgres::PgStore;
pub use store::{Storage, StoreError};
