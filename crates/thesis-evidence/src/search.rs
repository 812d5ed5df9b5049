//! Search capability and the evidence gateway
//!
//! The gateway is the boundary the research loop sees: it never raises.
//! Provider errors and empty result sets both collapse into outcomes the
//! loop treats as "insufficient evidence"; only hard transport failures
//! are distinguishable, and only in the logs.

use crate::{EvidenceBundle, Result, Source};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Hints passed through to the search provider
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Provider-specific depth hint
    pub search_depth: String,

    /// Maximum number of results to return
    pub max_results: usize,

    /// Whether to request a synthesized answer
    pub include_answer: bool,

    /// Whether to request full page content
    pub include_raw_content: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            search_depth: "advanced".to_string(),
            max_results: 5,
            include_answer: true,
            include_raw_content: true,
        }
    }
}

/// Trait for web search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Execute a search and return raw (possibly duplicated) sources
    async fn search(&self, query: &str, request: &SearchRequest) -> Result<Vec<Source>>;

    /// Get the provider name (e.g., "tavily")
    fn name(&self) -> &str;
}

/// Outcome of one gateway search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Evidence found (already deduplicated)
    Found(EvidenceBundle),

    /// The provider answered but returned nothing usable
    Empty,

    /// The provider failed; the loop treats this the same as Empty
    Failed(String),
}

impl SearchOutcome {
    /// The bundle, when evidence was found
    pub fn bundle(&self) -> Option<&EvidenceBundle> {
        match self {
            Self::Found(bundle) => Some(bundle),
            Self::Empty | Self::Failed(_) => None,
        }
    }
}

/// Uniform capability wrapping a search provider
pub struct EvidenceGateway {
    provider: Arc<dyn SearchProvider>,
    request: SearchRequest,
}

impl EvidenceGateway {
    /// Create a gateway with default request hints
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            request: SearchRequest::default(),
        }
    }

    /// Override the request hints
    pub fn with_request(mut self, request: SearchRequest) -> Self {
        self.request = request;
        self
    }

    /// Search for evidence; never returns an error
    pub async fn search(&self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::Failed("No search query provided".to_string());
        }

        match self.provider.search(query, &self.request).await {
            Ok(sources) if sources.is_empty() => {
                debug!(provider = self.provider.name(), query, "Search returned no results");
                SearchOutcome::Empty
            }
            Ok(sources) => {
                let bundle = EvidenceBundle::from_sources(sources);
                debug!(
                    provider = self.provider.name(),
                    query,
                    sources = bundle.len(),
                    "Search returned evidence"
                );
                SearchOutcome::Found(bundle)
            }
            Err(e) => {
                warn!(provider = self.provider.name(), query, "Search failed: {e}");
                SearchOutcome::Failed(e.to_string())
            }
        }
    }
}
