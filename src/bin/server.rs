//! Saint record HTTP server binary.
//!
//! Serves the submission form and the record API.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 3000)
//! - `SAINTS_STORE` — Storage backend: "sqlite" (default) or "memory"
//! - `SAINTS_DB_PATH` — SQLite file (default: `<data dir>/saints/saints.db`)
//! - `RUST_LOG` — Tracing filter (default: "info,saints=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! # or keep records in memory only:
//! SAINTS_STORE=memory cargo run --bin server
//! ```

use anyhow::Context;
use saints::config::StoreBackend;
use saints::server::{app_router, AppState};
use saints::{RecordService, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,saints=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    match config.store {
        StoreBackend::Sqlite => {
            tracing::info!(path = %config.db_path.display(), "Using SQLite store")
        }
        StoreBackend::Memory => tracing::warn!("Using in-memory store; records are lost on exit"),
    }
    let store = config.open_store().context("failed to open record store")?;

    let app = app_router(AppState::new(RecordService::new(store)));
    let bind_addr = config.bind_addr();

    tracing::info!("saints server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /            — submission form");
    tracing::info!("  GET  /health      — liveness check");
    tracing::info!("  POST /api/records — store a record");
    tracing::info!("  GET  /api/records — list records, newest first");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("saints server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
