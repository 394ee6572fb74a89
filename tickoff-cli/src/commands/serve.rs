//! HTTP server command
//!
//! Prepares the schema, then serves the todo list UI until shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use tickoff_server::db::schema;
use tickoff_server::http::{run_server, ServerConfig};
use tickoff_server::QueryExecutor;

use crate::config::TickoffConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &TickoffConfig) -> Result<()> {
    let database_url = config.database_url(args.database_url)?;
    let executor = QueryExecutor::from_url(&database_url).context("Invalid database URL")?;

    schema::migrate(&executor)
        .await
        .context("Failed to prepare database schema")?;

    let defaults = ServerConfig::default();
    let server_config = ServerConfig {
        bind_addr: args.bind.or(config.bind).unwrap_or(defaults.bind_addr),
        session_secret: config.session_secret.clone(),
    };

    tracing::info!("Starting tickoff server on {}", server_config.bind_addr);

    // Blocks until shutdown
    run_server(executor, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
