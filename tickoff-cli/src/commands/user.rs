//! User administration
//!
//! There is no sign-up page; accounts are provisioned from the command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use tickoff_server::{QueryExecutor, UserRepo};

use crate::config::TickoffConfig;

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,

    /// Database URL (overrides config/environment)
    #[arg(long, global = true)]
    pub database_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a user or reset their password
    Set(SetArgs),
}

#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Username to create or update
    pub username: String,

    /// Plain-text password, stored as a bcrypt hash
    #[arg(long, env = "TICKOFF_USER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run_user(args: UserArgs, config: &TickoffConfig) -> Result<()> {
    let database_url = config.database_url(args.database_url)?;
    let executor = QueryExecutor::from_url(&database_url).context("Invalid database URL")?;

    match args.command {
        UserCommands::Set(set) => {
            let username = set.username.trim();
            if username.is_empty() {
                bail!("Username cannot be empty");
            }
            if set.password.is_empty() {
                bail!("Password cannot be empty");
            }

            UserRepo::new(&executor)
                .upsert(username, &set.password)
                .await
                .with_context(|| format!("Failed to save user {username}"))?;

            tracing::info!(username, "user saved");
            println!("User {username} saved");
        }
    }

    Ok(())
}
