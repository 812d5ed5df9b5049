//! Final report type produced by a sub-agent

use serde::{Deserialize, Serialize};

/// Output of one completed sub-agent graph
///
/// The narrative is Markdown; sources are the already-deduplicated bullet
/// lines gathered during research. Both may be empty when a sub-agent found
/// no usable evidence: an empty report is valid, a missing one is not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalystReport {
    /// Markdown narrative of the analysis
    pub narrative: String,

    /// Deduplicated source lines (`* {title}: {url}`)
    pub sources: Vec<String>,
}

impl AnalystReport {
    /// Create a report with a narrative and no sources
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            sources: Vec::new(),
        }
    }

    /// Attach gathered sources
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = AnalystReport::new("## Analysis")
            .with_sources(vec!["* Example: https://example.com".to_string()]);
        assert_eq!(report.narrative, "## Analysis");
        assert_eq!(report.sources.len(), 1);
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = AnalystReport::default();
        assert!(report.narrative.is_empty());
        assert!(report.sources.is_empty());
    }
}
