//! Relay error taxonomy
//!
//! One error type for the whole request path. Each variant maps to the HTTP
//! status the caller sees; the detailed cause is logged, not returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors produced while storing credentials or building a summary
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Malformed or missing caller-supplied data (400)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No credential set has been stored yet (404)
    #[error("no credentials stored")]
    CredentialsMissing,

    /// The downstream service rejected the stored credentials (403)
    #[error("downstream rejected credentials")]
    CredentialsInvalid,

    /// The credential slot could not be written or read (500)
    #[error("storage error: {0}")]
    Storage(String),

    /// The credential slot holds malformed data (500)
    #[error("parse error: {0}")]
    Parse(String),

    /// Any other downstream failure (500)
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::CredentialsMissing => StatusCode::NOT_FOUND,
            Self::CredentialsInvalid => StatusCode::FORBIDDEN,
            Self::Storage(_) | Self::Parse(_) | Self::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::CredentialsMissing => "Please set your headers".to_string(),
            Self::CredentialsInvalid => "Please update your credentials".to_string(),
            Self::Storage(_) => "Failed to save headers".to_string(),
            Self::Parse(_) => "Failed to parse headers".to_string(),
            Self::Upstream(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        let body = axum::Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e.to_string())
    }
}

pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(
            RelayError::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RelayError::CredentialsMissing.status(), StatusCode::NOT_FOUND);
        assert_eq!(RelayError::CredentialsInvalid.status(), StatusCode::FORBIDDEN);
        for err in [
            RelayError::Storage("disk".into()),
            RelayError::Parse("json".into()),
            RelayError::Upstream("502".into()),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn internal_details_stay_out_of_public_message() {
        let err = RelayError::Upstream("connect to 10.0.0.1 refused".into());
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("10.0.0.1"));
    }

    #[test]
    fn invalid_input_message_is_passed_through() {
        let err = RelayError::InvalidInput("URL is required".into());
        assert_eq!(err.public_message(), "URL is required");
    }

    #[test]
    fn reqwest_errors_are_upstream() {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(RelayError::from(err), RelayError::Upstream(_)));
    }

    #[tokio::test]
    async fn into_response_carries_status_and_error_body() {
        let response = RelayError::CredentialsMissing.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Please set your headers");
    }
}
