//! Startup helpers for the article generator server.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, anyhow};

use crate::config::ServerConfig;
use crate::server::{self, AppState};

/// Run the server until Ctrl+C (used by the `article-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting article generator v{}", env!("CARGO_PKG_VERSION"));

    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn try_run() -> anyhow::Result<()> {
    let state = initialize()?;

    let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
    rt.block_on(server::run_server_with_shutdown(Arc::clone(&state), shutdown_signal()))
        .map_err(|e| anyhow!("Server error: {e}"))?;

    // The blocking HTTP client inside `state` must be dropped outside the runtime.
    drop(rt);
    drop(state);
    Ok(())
}

/// Read and validate configuration, then build application state.
///
/// # Errors
/// Returns an error if the configuration is invalid or state creation fails.
pub fn initialize() -> anyhow::Result<Arc<AppState>> {
    let config = ServerConfig::from_env();
    config.validate().context("Invalid configuration")?;

    tracing::info!("Ollama endpoint: {}", config.ollama_url);
    tracing::info!("Default model: {}", config.default_model);

    AppState::new(config).map_err(|e| anyhow!("Failed to create state: {e}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Ctrl+C handler failed: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
