//! Database bootstrap command
//!
//! Creates the tables and seeds cities, then exits. `serve` does the same
//! on startup; this is for provisioning ahead of time.

use anyhow::Result;
use clap::Parser;
use employees_server::Storage;

use super::ConnectArgs;

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

pub async fn run_init(args: InitArgs) -> Result<()> {
    let store = args.connect.open_store().await?;
    let cities = store.get_cities().await?;
    tracing::info!(cities = cities.len(), "Database ready");
    Ok(())
}
