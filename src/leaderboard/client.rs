//! Leaderboard REST client
//!
//! Talks to the Binance futures leaderboard `bapi` endpoints with the stored
//! session headers.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{ApiEnvelope, BaseInfo, PerformanceData, PerformanceSample, PositionData};
use crate::credentials::CredentialSet;
use crate::error::{RelayError, RelayResult};

pub const POSITION_PATH: &str = "/bapi/futures/v2/private/future/leaderboard/getOtherPosition";
pub const PERFORMANCE_PATH: &str =
    "/bapi/futures/v2/public/future/leaderboard/getOtherPerformance";
pub const BASE_INFO_PATH: &str =
    "/bapi/futures/v2/public/future/leaderboard/getOtherLeaderboardBaseInfo";

/// The three downstream lookups a summary needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardApi: Send + Sync {
    /// Raw open positions (`otherPositionRetList`)
    async fn fetch_positions(
        &self,
        encrypted_uid: &str,
        credentials: &CredentialSet,
    ) -> RelayResult<Vec<Value>>;

    /// Performance samples (`performanceRetList`)
    async fn fetch_performance(
        &self,
        encrypted_uid: &str,
        credentials: &CredentialSet,
    ) -> RelayResult<Vec<PerformanceSample>>;

    /// Display name (`nickName`)
    async fn fetch_nickname(
        &self,
        encrypted_uid: &str,
        credentials: &CredentialSet,
    ) -> RelayResult<Option<String>>;
}

/// reqwest implementation of [`LeaderboardApi`]
#[derive(Debug, Clone)]
pub struct BinanceLeaderboardClient {
    client: Client,
    base_url: String,
    trade_type: String,
}

impl BinanceLeaderboardClient {
    pub fn new(base_url: &str, trade_type: &str, timeout: Duration) -> RelayResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            trade_type: trade_type.to_string(),
        })
    }

    /// POST a JSON body and unwrap the `data` field of the envelope.
    ///
    /// A 403 is reported as `CredentialsInvalid`; any other failure as
    /// `Upstream`.
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        credentials: &CredentialSet,
    ) -> RelayResult<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(credentials.to_header_map())
            .json(body)
            .send()
            .await
            .map_err(|e| RelayError::Upstream(format!("POST {}: {}", path, e)))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            warn!("🔒 {} rejected stored credentials", path);
            return Err(RelayError::CredentialsInvalid);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream(format!(
                "{} returned {} - {}",
                path, status, text
            )));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| RelayError::Upstream(format!("failed to parse {} response: {}", path, e)))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl LeaderboardApi for BinanceLeaderboardClient {
    async fn fetch_positions(
        &self,
        encrypted_uid: &str,
        credentials: &CredentialSet,
    ) -> RelayResult<Vec<Value>> {
        let body = json!({ "encryptedUid": encrypted_uid, "tradeType": self.trade_type });
        let data: Option<PositionData> = self.post(POSITION_PATH, &body, credentials).await?;
        Ok(data
            .and_then(|d| d.other_position_ret_list)
            .unwrap_or_default())
    }

    async fn fetch_performance(
        &self,
        encrypted_uid: &str,
        credentials: &CredentialSet,
    ) -> RelayResult<Vec<PerformanceSample>> {
        let body = json!({ "encryptedUid": encrypted_uid, "tradeType": self.trade_type });
        let data: Option<PerformanceData> = self.post(PERFORMANCE_PATH, &body, credentials).await?;
        Ok(data.map(PerformanceData::into_samples).unwrap_or_default())
    }

    async fn fetch_nickname(
        &self,
        encrypted_uid: &str,
        credentials: &CredentialSet,
    ) -> RelayResult<Option<String>> {
        let body = json!({ "encryptedUid": encrypted_uid });
        let data: Option<BaseInfo> = self.post(BASE_INFO_PATH, &body, credentials).await?;
        Ok(data.and_then(|d| d.nick_name))
    }
}
