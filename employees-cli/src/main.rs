//! employees CLI - runs the employee directory API
//!
//! - `serve`: connect, bootstrap the schema, serve HTTP
//! - `init`: connect and bootstrap the schema only
//!
//! Database settings come from `DB_HOST`, `DB_PORT`, `DB_USER`,
//! `DB_PASSWORD` and `DB_NAME`; a `.env` file in the working directory is
//! loaded first if present.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "employees",
    author,
    version,
    about = "Employee directory HTTP API backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create tables and seed cities, then exit
    Init(commands::init::InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Init(args) => commands::init::run_init(args).await,
    }
}
