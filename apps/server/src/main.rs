//! corpsearch - Web Server Entry Point

use anyhow::Context;
use clap::Parser;
use corpsearch::{api::create_router, config::Config, db::MemoryStore, logging, state::AppState};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[clap(name = "corpsearch-server")]
#[clap(about = "Read-only search API over a corporate registry", version)]
struct Args {
    /// TOML configuration file, layered under environment variables
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Serve a JSON fixture file from memory instead of PostgreSQL
    #[clap(long)]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_from(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _telemetry_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging/telemetry")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = config.logging.deployment_environment,
        "Starting corpsearch"
    );

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;

    let state = match &args.fixtures {
        Some(path) => {
            let store = MemoryStore::from_json_file(path)?;
            tracing::warn!(fixtures = %path.display(), "Serving fixture data from memory");
            AppState::with_store(config, Arc::new(store))
        }
        None => AppState::new(config)
            .await
            .context("Failed to initialize application state")?,
    };

    let app = create_router(state);

    tracing::info!(listen_addr = %addr, "corpsearch listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server terminated unexpectedly");
        logging::shutdown_telemetry();
        return Err(e.into());
    }

    tracing::info!("Server shutdown complete");
    logging::shutdown_telemetry();

    Ok(())
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("SIGINT received, starting graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for CTRL+C");
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
