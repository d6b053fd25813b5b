//! # Cotiza API Server
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. .env (optional) ─► tracing ─► ApiConfig::load()                     │
//! │  2. Database::new (creates file, runs migrations)                       │
//! │  3. build_router ─► TcpListener::bind(HOST:PORT)                        │
//! │  4. serve until Ctrl+C / SIGTERM, then drain and close the pool         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cotiza_api::config::ApiConfig;
use cotiza_api::{build_router, AppState};
use cotiza_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is normal outside development
    let dotenv = dotenvy::dotenv();

    init_tracing();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to read .env"),
    }

    info!("Starting Cotiza API server...");

    let config = ApiConfig::load()?;
    let addr = config.bind_addr()?;
    info!(
        %addr,
        database = %config.database_path.display(),
        cors_allow_any = config.cors_allow_any,
        "Configuration loaded"
    );

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("opening database")?;
    info!("Database ready");

    let app = build_router(AppState::new(db.clone()), config.cors_allow_any);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cotiza=trace` - Show trace for cotiza crates only
/// - Default: INFO, with DEBUG for cotiza crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cotiza=debug,sqlx=warn,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
