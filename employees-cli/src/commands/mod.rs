pub mod init;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;
use employees_server::db::DEFAULT_MAX_ATTEMPTS;
use employees_server::{open_postgres, DatabaseConfig, PgStore, RetryPolicy};

/// Database connection options shared by commands that touch PostgreSQL
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Connection attempts before giving up (backoff doubles from 1s)
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub connect_attempts: u32,
}

impl ConnectArgs {
    /// Connect and bootstrap the schema (tables + city seed).
    pub async fn open_store(&self) -> Result<PgStore> {
        let config = DatabaseConfig::from_env().context("Invalid database configuration")?;
        tracing::debug!(?config, "Database configuration loaded");

        let policy = RetryPolicy {
            max_attempts: self.connect_attempts,
            ..RetryPolicy::default()
        };

        let store = open_postgres(&config, &policy).await?;
        Ok(store)
    }
}
