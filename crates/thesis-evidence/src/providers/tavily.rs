//! Tavily search API client

use crate::error::{EvidenceError, Result};
use crate::search::{SearchProvider, SearchRequest};
use crate::Source;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://api.tavily.com/search";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Tavily search API client
#[derive(Debug, Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<Source>,
    #[serde(default)]
    error: Option<String>,
}

impl TavilyClient {
    /// Create a new Tavily client with API key and rate limit
    ///
    /// # Arguments
    /// * `api_key` - Tavily API key
    /// * `rate_limit` - Maximum requests per minute
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Result<Self> {
        let quota = Quota::per_minute(
            NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(60).expect("nonzero")),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    /// Create from environment variable TAVILY_API_KEY with default rate limit
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY").map_err(|_| {
            EvidenceError::ConfigError("TAVILY_API_KEY environment variable not set".to_string())
        })?;

        Self::new(api_key, 60)
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    #[instrument(skip(self, request), fields(query = %query))]
    async fn search(&self, query: &str, request: &SearchRequest) -> Result<Vec<Source>> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let body = TavilyRequest {
            api_key: &self.api_key,
            query,
            search_depth: &request.search_depth,
            max_results: request.max_results,
            include_answer: request.include_answer,
            include_raw_content: request.include_raw_content,
        };

        let response = self.client.post(BASE_URL).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(EvidenceError::ProviderError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: TavilyResponse = response.json().await?;

        if let Some(error) = data.error {
            return Err(EvidenceError::ProviderError(error));
        }

        debug!(results = data.results.len(), "Tavily search completed");
        Ok(data.results)
    }

    fn name(&self) -> &str {
        "tavily"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TavilyClient::new("test-key", 60);
        assert!(client.is_ok());
        assert_eq!(client.expect("client").name(), "tavily");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"results": [{"title": "T", "url": "https://t", "content": "c"}]}"#;
        let parsed: TavilyResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.results.len(), 1);
        assert!(parsed.results[0].raw_content.is_none());
    }
}
