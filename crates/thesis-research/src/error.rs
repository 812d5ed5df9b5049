//! Error types for the research engine

use thiserror::Error;

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Errors from the research loop, fan-out, or aggregation
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Model call failed (schema violations land here and are unit-fatal)
    #[error("Model error: {0}")]
    Model(#[from] thesis_llm::ModelError),

    /// Serialization error while building a merge prompt
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A spawned fan-out unit could not be joined (panicked or cancelled)
    #[error("Fan-out unit failed: {0}")]
    Join(String),
}

/// Convert ResearchError to thesis_core::Error at the analyst boundary
impl From<ResearchError> for thesis_core::Error {
    fn from(err: ResearchError) -> Self {
        thesis_core::Error::ProcessingFailed(err.to_string())
    }
}
