//! Error types for evidence operations

use thiserror::Error;

/// Result type alias for evidence operations
pub type Result<T> = std::result::Result<T, EvidenceError>;

/// Errors from external evidence providers
#[derive(Debug, Error)]
pub enum EvidenceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Provider-reported error (soft failure)
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// No financial data exists for the symbol
    #[error("No data found for symbol: {symbol}")]
    NotFound {
        /// Symbol that was requested
        symbol: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
