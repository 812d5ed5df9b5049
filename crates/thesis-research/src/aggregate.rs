//! Order-deterministic aggregation of fan-out outputs
//!
//! Units are merged in launch order. Structured payloads merge per
//! [`MergeOrdered`]: scalar fields take the last unit's value, list fields
//! concatenate. Source logs are split, cleaned, and deduplicated keeping
//! the first occurrence. The combined narrative comes from one free-text
//! model call over the units' final summaries and the merged payload.

use crate::error::Result;
use crate::state::LoopOutput;
use crate::template::fill;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thesis_llm::ModelCaller;
use tracing::{debug, instrument};

/// Launch-order merge of structured payloads
///
/// Implementations fold later units over earlier ones: scalars overwrite,
/// lists append. Merging is idempotent for scalars and order-preserving
/// for lists.
pub trait MergeOrdered: Default + Sized {
    /// Fold a later unit's payload into this one
    fn merge_from(&mut self, later: Self);

    /// Merge units in launch order; empty input yields the default
    fn merge(units: Vec<Self>) -> Self {
        let mut merged = Self::default();
        for unit in units {
            merged.merge_from(unit);
        }
        merged
    }
}

/// Deduplicate bulleted source logs into a single, stable list
///
/// Each log entry is split on `*`, trimmed, and stripped of embedded
/// newlines; the first occurrence of each cleaned source wins and order of
/// first appearance is preserved. Entries are re-bulleted on return.
pub fn dedup_sources(source_logs: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();

    for log in source_logs {
        for item in log.split('*') {
            let cleaned = item.replace(['\n', '\r'], " ").trim().to_string();
            if cleaned.is_empty() {
                continue;
            }
            if seen.insert(cleaned.clone()) {
                deduped.push(format!("* {cleaned}"));
            }
        }
    }

    deduped
}

/// Result of aggregating one analyst's fan-out
#[derive(Debug, Clone)]
pub struct Aggregated<T> {
    /// The merged structured payload
    pub analysis: T,

    /// The combined narrative, replacing the per-unit summaries
    pub narrative: String,

    /// Deduplicated bulleted sources across all units
    pub sources: Vec<String>,
}

/// Merges fan-out outputs and writes the combined narrative
pub struct Aggregator {
    caller: Arc<ModelCaller>,
}

impl Aggregator {
    /// Create an aggregator over the given caller
    pub fn new(caller: Arc<ModelCaller>) -> Self {
        Self { caller }
    }

    /// Aggregate unit outputs received in launch order
    ///
    /// The combine template sees `{summaries}` (the units' final summary
    /// entries, space-joined), `{combined_analysis}` (the merged payload as
    /// JSON), and `{topic}`. Units whose searches all failed contribute
    /// nothing and are tolerated.
    #[instrument(skip(self, units, combine_template), fields(units = units.len(), topic))]
    pub async fn aggregate<T>(
        &self,
        units: Vec<LoopOutput<T>>,
        topic: &str,
        combine_template: &str,
    ) -> Result<Aggregated<T>>
    where
        T: MergeOrdered + Serialize,
    {
        let mut analyses = Vec::new();
        let mut final_summaries = Vec::new();
        let mut source_logs = Vec::new();

        for unit in units {
            let summary = unit.final_summary();
            if !summary.is_empty() {
                final_summaries.push(summary.to_string());
            }
            analyses.extend(unit.analyses);
            source_logs.extend(unit.source_logs);
        }

        let sources = dedup_sources(&source_logs);
        let merged = T::merge(analyses);

        let summaries = final_summaries.join(" ");
        let combined_analysis = serde_json::to_string(&merged)?;
        let prompt = fill(combine_template, &[
            ("summaries", &summaries),
            ("combined_analysis", &combined_analysis),
            ("topic", topic),
        ]);
        let narrative = self.caller.generate_text(&prompt).await?;

        debug!(sources = sources.len(), "Aggregation complete");
        Ok(Aggregated {
            analysis: merged,
            narrative,
            sources,
        })
    }
}
