//! Startup helpers for the summarization service.

use std::process::ExitCode;

use crate::config::CondenserConfig;
use crate::server::{self, AppState};

/// Run the service until shutdown.
///
/// Loads `.env` if present, initializes logging, reads configuration from
/// the environment and serves until the process is stopped.
#[must_use]
pub fn run() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting condenser v{}", env!("CARGO_PKG_VERSION"));

    let config = match CondenserConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::info!("Summarization endpoint: {}", config.endpoint);

    let state = match AppState::new(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server(state, config.port)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
