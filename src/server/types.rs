//! HTTP request/response DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /leaderboard-info`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardInfoRequest {
    pub url: Option<String>,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
