#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::{Context, Result};
use clap::Parser;
use command_safety::app::dispatch::dispatch;
use command_safety::cli::Cli;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// `ORCHESTRATE_LOG` wins over `-v`. Default keeps stdout a clean summary.
fn log_level(verbose: u8) -> Level {
    if let Ok(raw) = std::env::var("ORCHESTRATE_LOG")
        && let Ok(level) = raw.trim().parse::<Level>()
    {
        return level;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    dispatch(cli).await
}
