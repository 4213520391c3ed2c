use anyhow::{Context, Result};
use clap::Parser;
use responder_application::bootstrap;
use responder_core::error::ResponderError;
use responder_infrastructure::AppConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", describe(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.log_level, cli.verbose)?;

    let app = bootstrap(&config)?;
    debug!(data_dir = %app.data_dir.display(), "Responder ready");
    commands::handle(cli.command, &app, &config).await
}

/// Installs the fmt subscriber on stderr.
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
fn init_logging(default_level: &str, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// Generation and rate limit failures are shown with their user-facing text.
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ResponderError>() {
        Some(e @ (ResponderError::RateLimited { .. } | ResponderError::Generation(_))) => {
            e.user_message()
        }
        _ => format!("{err:#}"),
    }
}
