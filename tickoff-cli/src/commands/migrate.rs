//! Create the users, todolists, and todos tables if they are missing.

use anyhow::{Context, Result};
use clap::Parser;

use tickoff_server::db::schema;
use tickoff_server::QueryExecutor;

use crate::config::TickoffConfig;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &TickoffConfig) -> Result<()> {
    let database_url = config.database_url(args.database_url)?;
    let executor = QueryExecutor::from_url(&database_url).context("Invalid database URL")?;

    schema::migrate(&executor)
        .await
        .context("Migration failed")?;

    println!("Schema is up to date");
    Ok(())
}
