//! Configurator Service Binary
//!
//! Starts the vehicle configurator HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin configurator-service
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIGURATOR_CONFIG`: Path to the YAML config (default: `config.yaml`,
//!   built-in defaults when absent)
//! - `GEMINI_API_KEY`: Generative AI key, referenced from the config file as
//!   `${GEMINI_API_KEY}`; AI suggestions are disabled without it
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use configurator_service::config::{CONFIG_PATH_ENV, Config, load_config};
use configurator_service::observability::install_recorder;
use configurator_service::suggest::{GeminiClient, TextGenerator};
use configurator_service::telemetry::init_tracing;
use configurator_service::{AppState, Catalog, create_router};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var(CONFIG_PATH_ENV).ok();
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    init_tracing(&config.observability.logging).context("failed to initialize tracing")?;
    tracing::info!("Starting Configurator Service");
    log_config(&config);

    let catalog = Catalog::load(config.catalog.path.as_deref()).context("failed to load catalog")?;
    tracing::info!(
        models = catalog.models().len(),
        series = catalog.series().len(),
        source = config.catalog.path.as_deref().unwrap_or("embedded"),
        "Catalog loaded"
    );

    let mut state = AppState::new(Arc::new(catalog), &config, create_generator(&config));
    match install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => tracing::warn!(error = %e, "Metrics disabled"),
    }

    let app = create_router(state, &config.server);
    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()
        .context("invalid bind address")?;

    tracing::info!(%addr, "HTTP server starting");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Configurator service stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        load_dotenv_from_ancestors();
    }
}

fn load_dotenv_from_ancestors() {
    let Ok(cwd) = std::env::current_dir() else {
        return;
    };
    if let Some(path) = find_ancestor_dotenv(&cwd)
        && let Err(e) = dotenvy::from_path(&path)
    {
        eprintln!("Ignoring unreadable {}: {e}", path.display());
    }
}

/// Nearest `.env` in a strict ancestor of `start`.
fn find_ancestor_dotenv(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .skip(1)
        .map(|dir| dir.join(".env"))
        .find(|path| path.is_file())
}

/// Log the effective configuration; the API key is never logged.
fn log_config(config: &Config) {
    tracing::info!(
        bind_address = %config.server.bind_address,
        http_port = config.server.http_port,
        permissive_cors = config.server.permissive_cors,
        destination_fee = %config.pricing.destination_fee,
        tax_rate = %config.pricing.tax_rate,
        ai_enabled = config.suggestions.is_enabled(),
        ai_model = %config.suggestions.model,
        max_saved = config.sessions.max_saved,
        max_sessions = config.sessions.max_sessions,
        "Configuration loaded"
    );
}

/// Create the generative AI client when an API key is configured.
fn create_generator(config: &Config) -> Option<Arc<dyn TextGenerator>> {
    if !config.suggestions.is_enabled() {
        tracing::warn!("No generative AI key configured; AI suggestions will return 503");
        return None;
    }

    match GeminiClient::new(&config.suggestions) {
        Ok(client) => {
            tracing::info!(model = %config.suggestions.model, "Generative AI client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize generative AI client");
            None
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// If a handler cannot be installed that branch never completes and the
/// other signal still stops the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nearest_ancestor_dotenv() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".env"), "X=1\n").unwrap();
        std::fs::write(root.path().join("a").join(".env"), "X=2\n").unwrap();

        assert_eq!(
            find_ancestor_dotenv(&nested),
            Some(root.path().join("a").join(".env"))
        );
    }

    #[test]
    fn start_directory_is_not_searched() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("only");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(".env"), "X=1\n").unwrap();

        assert_ne!(find_ancestor_dotenv(&dir), Some(dir.join(".env")));
    }
}
