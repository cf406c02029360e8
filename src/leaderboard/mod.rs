//! Leaderboard Aggregator
//!
//! Resolves a profile URL to its `encryptedUid`, pulls positions, performance
//! and base info with the stored credentials, and folds them into a
//! [`LeaderboardSummary`].

mod client;
mod summary;
mod types;

pub use client::{
    BinanceLeaderboardClient, LeaderboardApi, BASE_INFO_PATH, PERFORMANCE_PATH, POSITION_PATH,
};
#[cfg(test)]
pub use client::MockLeaderboardApi;
pub use summary::{
    classify_position, LeaderboardSummary, PerformanceMetrics, PositionCounts, PositionSide,
};
pub use types::*;

use reqwest::Url;
use tracing::info;

use crate::credentials::CredentialStore;
use crate::error::{RelayError, RelayResult};

const ENCRYPTED_UID_PARAM: &str = "encryptedUid";

/// Pull the target identifier out of a leaderboard profile URL
pub fn extract_encrypted_uid(target_url: &str) -> RelayResult<String> {
    let url = Url::parse(target_url)
        .map_err(|_| RelayError::InvalidInput("Invalid URL format".to_string()))?;

    url.query_pairs()
        .find(|(key, _)| key == ENCRYPTED_UID_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| RelayError::InvalidInput("Invalid URL: encryptedUid not found".to_string()))
}

/// Build the summary for the profile behind `target_url`.
///
/// Credentials are loaded before any downstream call. The three calls run
/// concurrently and are all awaited, so a credential rejection from any of
/// them wins over other failures.
pub async fn fetch_summary(
    api: &dyn LeaderboardApi,
    store: &dyn CredentialStore,
    target_url: &str,
) -> RelayResult<LeaderboardSummary> {
    let encrypted_uid = extract_encrypted_uid(target_url)?;
    let credentials = store.get().await?;

    info!("📊 Fetching leaderboard profile {}", encrypted_uid);

    let (positions, performance, nickname) = tokio::join!(
        api.fetch_positions(&encrypted_uid, &credentials),
        api.fetch_performance(&encrypted_uid, &credentials),
        api.fetch_nickname(&encrypted_uid, &credentials),
    );

    let rejected = matches!(positions, Err(RelayError::CredentialsInvalid))
        || matches!(performance, Err(RelayError::CredentialsInvalid))
        || matches!(nickname, Err(RelayError::CredentialsInvalid));
    if rejected {
        return Err(RelayError::CredentialsInvalid);
    }

    let positions = positions?;
    let performance = performance?;
    let nickname = nickname?;

    let summary = LeaderboardSummary::assemble(nickname, positions, &performance);
    info!(
        "✅ {} → {} open ({} long / {} short)",
        encrypted_uid,
        summary.open_positions,
        summary.open_long_positions,
        summary.open_short_positions
    );
    Ok(summary)
}
