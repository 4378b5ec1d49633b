use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

use relay_common::config::AppConfig;
use relay_common::error::RelayError;
use relay_common::types::{Cursor, PollResult};

/// Source of homework review statuses.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch everything that changed since `since`. No retry happens here.
    async fn fetch(&self, since: Cursor) -> Result<PollResult, RelayError>;
}

/// HTTP client for the homework review API.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ReviewClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.endpoint.clone(), config.practicum_token.clone())
    }
}

#[async_trait]
impl ReviewApi for ReviewClient {
    async fn fetch(&self, since: Cursor) -> Result<PollResult, RelayError> {
        let from_date = since.resolve();
        tracing::debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Review endpoint unreachable");
                RelayError::Endpoint(e.without_url().to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), "Review API returned a non-200 status");
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Review API response is not JSON");
            RelayError::MalformedResponse(e.without_url().to_string())
        })?;

        Ok(body.into())
    }
}
