//! Financial data capability
//!
//! The quantitative sub-agent needs one operation: fetch all available
//! financial facts for a symbol, or learn that the symbol is unknown so it
//! can reflect and retry with a different exchange format.

use crate::Result;
use async_trait::async_trait;

/// Trait for per-symbol financial data providers
#[async_trait]
pub trait FinancialDataProvider: Send + Sync {
    /// Fetch the full nested financial document for a symbol
    ///
    /// Returns [`crate::EvidenceError::NotFound`] when the provider has no
    /// data under that symbol; other errors indicate transport problems.
    async fn fetch(&self, symbol: &str) -> Result<serde_json::Value>;

    /// Get the provider name (e.g., "quickfs")
    fn name(&self) -> &str;
}
