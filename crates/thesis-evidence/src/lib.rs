//! Evidence gateway for thesis-rs
//!
//! This crate wraps the external evidence providers behind uniform
//! capabilities:
//!
//! - [`SearchProvider`] / [`EvidenceGateway`] for web search, normalizing
//!   provider failures into a tri-state [`SearchOutcome`]
//! - [`EvidenceBundle`] with URL deduplication and deterministic truncation
//! - [`FinancialDataProvider`] for per-symbol financial documents
//! - [`flatten_json`] and prompt formatting for nested financial facts

pub mod bundle;
pub mod error;
pub mod financial;
pub mod flatten;
pub mod providers;
pub mod search;

// Re-export main types
pub use bundle::{EvidenceBundle, Source};
pub use error::{EvidenceError, Result};
pub use financial::FinancialDataProvider;
pub use flatten::{flatten_json, format_for_model, FormatOptions};
pub use providers::{QuickFsClient, TavilyClient};
pub use search::{EvidenceGateway, SearchOutcome, SearchProvider, SearchRequest};
