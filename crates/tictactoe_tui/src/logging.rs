//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so it logs to a file. Headless commands log to
//! stderr and keep stdout for their output.

use crate::config::Config;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` if set, otherwise the configured filter.
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Sends tracing output to the configured log file.
pub fn init_file_tracing(config: &Config) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Sends tracing output to stderr.
pub fn init_stderr_tracing(config: &Config) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .try_init();
}
