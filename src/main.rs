//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `ip_intel` library that handles argument
//! parsing, logger initialization and the exit code. All core functionality
//! is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_intel::initialization::init_logger_with;
use ip_intel::{run, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(config).await {
        Ok(report) if report.last_failed => process::exit(1),
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("ip_intel error: {:#}", e);
            process::exit(1);
        }
    }
}
