#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod hash;
mod primes;

use std::path::Path;

use args::{Args, Command};
use clap::Parser;
use tally_config::Config;
use tally_server::Server;
use tokio_util::sync::CancellationToken;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&args.config),
        Command::Hash { value } => hash::execute(value),
        Command::Primes { limit } => {
            primes::execute(limit);
            Ok(())
        }
    }
}

#[tokio::main]
async fn serve(config_path: &Path) -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load(config_path)?;

    // Initialize logging
    tally_telemetry::init(config.log.as_ref(), "info")?;

    tracing::info!(
        config_path = %config_path.display(),
        "starting tally"
    );

    // Build server
    let server = Server::new(config).await?;

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    // Run server
    server.serve(shutdown).await?;

    tracing::info!("tally stopped");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
