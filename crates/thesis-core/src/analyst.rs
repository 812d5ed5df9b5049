//! Core Analyst trait definition

use crate::{AnalystReport, Result};
use async_trait::async_trait;

/// Core trait that all research sub-agents implement
///
/// An analyst receives a single subject string (a stock ticker, a company
/// name, or a pre-planned research query) and runs its full internal graph
/// of planning, parallel research loops, and aggregation to a terminal report.
/// Once `analyze` returns, no further work happens for that subject.
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Run the sub-agent to completion for the given subject
    async fn analyze(&self, subject: &str) -> Result<AnalystReport>;

    /// Get the analyst's name (e.g. "economic", "industry")
    fn name(&self) -> &str;
}
