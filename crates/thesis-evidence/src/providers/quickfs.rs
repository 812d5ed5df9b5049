//! QuickFS financial data API client

use crate::error::{EvidenceError, Result};
use crate::financial::FinancialDataProvider;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://public-api.quickfs.net/v1/data/all-data";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// QuickFS API client
///
/// Fetches the full financial dataset for a symbol (e.g. "AAPL:US",
/// "CBA:AU"). The symbol format varies by exchange; the quantitative
/// analyst retries alternative formats when the symbol is unknown.
#[derive(Debug, Clone)]
pub struct QuickFsClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl QuickFsClient {
    /// Create a new QuickFS client with API key and rate limit
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Result<Self> {
        let quota = Quota::per_minute(
            NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(10).expect("nonzero")),
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

    /// Create from environment variable QUICKFS_API_KEY with default rate limit
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("QUICKFS_API_KEY").map_err(|_| {
            EvidenceError::ConfigError("QUICKFS_API_KEY environment variable not set".to_string())
        })?;

        Self::new(api_key, 10)
    }
}

#[async_trait]
impl FinancialDataProvider for QuickFsClient {
    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn fetch(&self, symbol: &str) -> Result<serde_json::Value> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(format!("{BASE_URL}/{symbol}"))
            .header("X-QFS-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let data: serde_json::Value = response.json().await?;

        // QuickFS reports unknown symbols via an "errors" key in the body
        if data.get("errors").is_some() || status.as_u16() == 404 {
            return Err(EvidenceError::NotFound {
                symbol: symbol.to_string(),
            });
        }

        if !status.is_success() {
            return Err(EvidenceError::ProviderError(format!("HTTP error: {status}")));
        }

        debug!("QuickFS data fetched");
        Ok(data)
    }

    fn name(&self) -> &str {
        "quickfs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = QuickFsClient::new("test-key", 10);
        assert!(client.is_ok());
        assert_eq!(client.expect("client").name(), "quickfs");
    }
}
