//! Leaderboard Relay - entry point

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leaderboard_relay::config::AppConfig;
use leaderboard_relay::server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.logging.json);

    info!("📋 {}", config);
    server::run(config).await
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
