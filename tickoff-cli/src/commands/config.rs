//! Inspect the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{config_path, TickoffConfig};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration with secrets masked
    Show,
}

pub fn run_config(args: ConfigArgs, config: &TickoffConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_path().display());
        }
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(&config.redacted())
                .context("Failed to render config")?;
            print!("{rendered}");
        }
    }
    Ok(())
}
