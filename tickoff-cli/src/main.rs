use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::{ConfigArgs, MigrateArgs, ServeArgs, UserArgs};
use config::TickoffConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-user todo lists served over HTTP")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web server
    Serve(ServeArgs),
    /// Create or update the database schema
    Migrate(MigrateArgs),
    /// Manage user accounts
    User(UserArgs),
    /// Show configuration paths and values
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up .env before reading the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TickoffConfig::load()?;

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        level: config.log_level.clone(),
    })
    .ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &config).await?,
        Commands::Migrate(args) => commands::run_migrate(args, &config).await?,
        Commands::User(args) => commands::run_user(args, &config).await?,
        Commands::Config(args) => commands::run_config(args, &config)?,
    }

    Ok(())
}
