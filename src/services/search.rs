use crate::models::{ActorSummary, SearchActorsResponse};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

const TYPEAHEAD_PATH: &str = "/xrpc/app.bsky.actor.searchActorsTypeahead";

/// Errors that can occur during actor search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Typeahead search against the public profile service
pub struct SearchClient {
    service_url: String,
    limit: u8,
    min_query_len: usize,
    client: Client,
}

impl SearchClient {
    pub fn new(
        service_url: impl Into<String>,
        limit: u8,
        min_query_len: usize,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            service_url: service_url.into(),
            limit,
            min_query_len,
            client,
        })
    }

    /// Search actors by handle or display name prefix
    ///
    /// Queries shorter than the configured minimum return no results without
    /// hitting the network.
    pub async fn search_actors(&self, query: &str) -> Result<Vec<ActorSummary>, SearchError> {
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            tracing::trace!("Skipping search for short query: {:?}", query);
            return Ok(Vec::new());
        }

        let url = format!(
            "{}{}?q={}&limit={}",
            self.service_url.trim_end_matches('/'),
            TYPEAHEAD_PATH,
            urlencoding::encode(query),
            self.limit
        );

        tracing::debug!("Searching actors: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError(format!(
                "Actor search failed: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let parsed: SearchActorsResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse actors: {}", e)))?;

        Ok(parsed.actors)
    }
}
