//! HTTP server command
//!
//! Runs the employee API against PostgreSQL (or the in-memory store).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use employees_server::{run_server, MemoryStore, ResponseMode, ServerConfig, Storage};

use super::ConnectArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "EMPLOYEES_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Report every error as 500 and echo id 0 on create (legacy clients)
    #[arg(
        long,
        env = "EMPLOYEES_LEGACY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub legacy: bool,

    /// Use the in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

impl ServeArgs {
    fn response_mode(&self) -> ResponseMode {
        if self.legacy {
            ResponseMode::Legacy
        } else {
            ResponseMode::Standard
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn Storage> = if args.memory {
        tracing::warn!("Using in-memory store, data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(args.connect.open_store().await?)
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        response_mode: args.response_mode(),
    };

    tracing::info!("Starting employees server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
