//! Error types for thesis-core

use thiserror::Error;

/// Result type alias for thesis-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for analyst operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Analyst initialization failed
    #[error("Analyst initialization failed: {0}")]
    InitializationFailed(String),

    /// Analyst processing failed
    #[error("Analyst processing failed: {0}")]
    ProcessingFailed(String),

    /// Required configuration is missing (fatal at startup)
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A sub-agent never produced its final report
    #[error("Missing report from analyst '{0}'")]
    MissingReport(String),
}
