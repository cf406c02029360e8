//! HTTP server
//!
//! Wires the credential store and leaderboard client into an axum router and
//! runs it until Ctrl+C.

mod api;
mod types;

pub use api::create_router;
pub use types::*;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::leaderboard::{BinanceLeaderboardClient, LeaderboardApi};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn LeaderboardApi>,
    pub store: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(api: Arc<dyn LeaderboardApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self { api, store }
    }

    /// File-backed store and the Binance client, as configured
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = BinanceLeaderboardClient::new(
            &config.upstream.base_url,
            &config.upstream.trade_type,
            config.upstream.timeout(),
        )
        .context("Failed to create leaderboard client")?;
        let store = FileCredentialStore::new(&config.storage.credentials_path);

        Ok(Self::new(Arc::new(api), Arc::new(store)))
    }
}

/// Bind and serve until a shutdown signal arrives
pub async fn run(config: AppConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, gracefully stopping");
}
