use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast;

mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod store;

use config::Config;
use store::{EntryStore, LocalStore, RemoteStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<Config>,
    pub ws_tx: Option<broadcast::Sender<String>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodshare_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env().context("Invalid configuration")?);

    let store = match &config.database_url {
        Some(url) => Store::Remote(
            RemoteStore::connect(url, config.utc_offset, config.seed_on_start)
                .await
                .context("Failed to create database pool")?,
        ),
        None => Store::Local(LocalStore::new(
            config.entry_store_path.clone(),
            config.utc_offset,
            config.mock_entries,
        )),
    };
    store
        .init()
        .await
        .context("Failed to initialize entry store")?;
    tracing::info!(kind = store.kind(), "Entry store initialized");

    // WebSocket broadcast channel
    let (ws_tx, _) = broadcast::channel::<String>(256);

    let state = AppState {
        store: Arc::new(store),
        config: config.clone(),
        ws_tx: Some(ws_tx),
    };

    let app = routes::build_router(state.clone());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state
        .store
        .shutdown()
        .await
        .context("Failed to shut down entry store")?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
