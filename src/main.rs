//! Biblioteca - interactive library catalog manager

use std::io;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblioteca::{
    cli::{ExitReason, Shell},
    config::{AppConfig, LogFormat, LoggingConfig},
    repository::Repository,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting Biblioteca v{}", env!("CARGO_PKG_VERSION"));

    let repository = Repository::new(config.storage.data_file.clone());
    let mut catalog = repository
        .load()
        .with_context(|| format!("Failed to load catalog from {}", repository.path().display()))?;

    tracing::info!(
        "Catalog ready: {} books, {} users",
        catalog.books().len(),
        catalog.users().len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), repository);

    match shell.run(&mut catalog).context("Session aborted")? {
        ExitReason::Saved => tracing::info!("Session ended, catalog saved"),
        ExitReason::EndOfInput => tracing::info!("Session ended without saving"),
    }

    Ok(())
}

/// Logs go to stderr so they never mix with the menu on stdout
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblioteca={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}
