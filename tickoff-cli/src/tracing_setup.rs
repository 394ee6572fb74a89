//! Tracing setup for the tickoff CLI
//!
//! Usage:
//!   tickoff --debug serve                 # Debug logging to console
//!   RUST_LOG=tickoff_server=debug tickoff # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                              # Log filter (overrides everything)
//!   TICKOFF_LOG                           # Default level via config (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used when RUST_LOG is not set)
    pub debug: bool,
    /// Level from config when neither RUST_LOG nor --debug is given
    pub level: Option<String>,
}

impl TracingConfig {
    /// Filter directive used when RUST_LOG is absent.
    pub fn default_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.level.as_deref().unwrap_or("info")
        }
    }
}

/// Initialize console tracing.
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directive()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins_over_config_level() {
        let config = TracingConfig {
            debug: true,
            level: Some("warn".into()),
        };
        assert_eq!(config.default_directive(), "debug");
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(TracingConfig::default().default_directive(), "info");
    }
}
