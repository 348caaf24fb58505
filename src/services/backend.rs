use crate::models::{BackendResponse, UserNetwork};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the aggregation backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No handle provided")]
    MissingHandle,
}

/// Client for the follower/following aggregation backend
///
/// The backend walks an actor's follower and following lists and returns
/// both in a single document:
/// `GET {base_url}?actor={handle}`
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Fetch the raw follower/following document for an actor
    pub async fn fetch_response(&self, handle: &str) -> Result<BackendResponse, BackendError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(BackendError::MissingHandle);
        }

        let url = format!("{}?actor={}", self.base_url, urlencoding::encode(handle));

        tracing::debug!("Fetching network from: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!("Actor {} not found", handle)));
        }
        if !status.is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to fetch network for {}: {}",
                handle, status
            )));
        }

        let body = response.text().await?;
        let parsed: BackendResponse = serde_json::from_str(&body).map_err(|e| {
            BackendError::InvalidResponse(format!("Failed to parse network for {}: {}", handle, e))
        })?;

        tracing::debug!(
            "Fetched {} follows and {} followers for {} (from cache: {})",
            parsed.follows.len(),
            parsed.followers.len(),
            handle,
            parsed.from_cache
        );

        Ok(parsed)
    }

    /// Fetch an actor and precompute their follower and following sets
    pub async fn fetch_network(&self, handle: &str) -> Result<UserNetwork, BackendError> {
        let response = self.fetch_response(handle).await?;
        Ok(UserNetwork::from(response))
    }
}
