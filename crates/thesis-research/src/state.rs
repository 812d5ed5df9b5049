//! Per-unit research loop state
//!
//! Each fan-out unit owns one [`LoopState`]. The three accumulators grow
//! monotonically: one analysis, one summary entry, and one source log entry
//! per successful iteration. A failed search consumes an iteration without
//! appending anything.

/// Phase of the research loop state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Searching, analyzing, and summarizing the current query
    Researching,

    /// Judging whether accumulated findings suffice
    Reflecting,

    /// Terminal; the unit's output is final
    Done,
}

/// Mutable state for one research unit
#[derive(Debug, Clone)]
pub struct LoopState<T> {
    /// The query driving the next search (refined between iterations)
    pub query: String,

    /// Iterations consumed so far (successful or failed)
    pub iteration: u32,

    /// One structured analysis per successful iteration
    pub analyses: Vec<T>,

    /// Running summary entries, newest last
    pub summaries: Vec<String>,

    /// Bulleted source log entries, one per successful iteration
    pub source_logs: Vec<String>,
}

impl<T> LoopState<T> {
    /// Start a fresh unit for an initial query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            iteration: 0,
            analyses: Vec::new(),
            summaries: Vec::new(),
            source_logs: Vec::new(),
        }
    }

    /// The newest summary entry, or empty before the first success
    pub fn latest_summary(&self) -> &str {
        self.summaries.last().map_or("", String::as_str)
    }

    /// Record a successful iteration
    pub fn record_success(&mut self, analysis: T, summary: String, source_log: String) {
        self.analyses.push(analysis);
        self.summaries.push(summary);
        self.source_logs.push(source_log);
        self.iteration += 1;
    }

    /// A failed or empty search still consumes an iteration
    pub fn record_failure(&mut self) {
        self.iteration += 1;
    }

    /// Seal the unit into its immutable output
    pub fn into_output(self) -> LoopOutput<T> {
        LoopOutput {
            analyses: self.analyses,
            summaries: self.summaries,
            source_logs: self.source_logs,
            iterations: self.iteration,
        }
    }
}

/// Immutable result of one completed research unit
#[derive(Debug, Clone, Default)]
pub struct LoopOutput<T> {
    /// Structured analyses, one per successful iteration
    pub analyses: Vec<T>,

    /// Running summary entries, newest last
    pub summaries: Vec<String>,

    /// Bulleted source log entries
    pub source_logs: Vec<String>,

    /// Iterations consumed; equals the bound when the unit stopped early
    pub iterations: u32,
}

impl<T> LoopOutput<T> {
    /// The unit's final summary entry, or empty if every search failed
    pub fn final_summary(&self) -> &str {
        self.summaries.last().map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_summary_empty_before_first_success() {
        let state: LoopState<()> = LoopState::new("q");
        assert_eq!(state.latest_summary(), "");
    }

    #[test]
    fn test_success_appends_to_all_accumulators() {
        let mut state: LoopState<u32> = LoopState::new("q");
        state.record_success(7, "summary".to_string(), "* s: u".to_string());
        assert_eq!(state.iteration, 1);
        assert_eq!(state.analyses, vec![7]);
        assert_eq!(state.latest_summary(), "summary");
        assert_eq!(state.source_logs.len(), 1);
    }

    #[test]
    fn test_failure_consumes_iteration_without_appending() {
        let mut state: LoopState<u32> = LoopState::new("q");
        state.record_failure();
        assert_eq!(state.iteration, 1);
        assert!(state.analyses.is_empty());
        assert!(state.summaries.is_empty());
        assert!(state.source_logs.is_empty());
    }

    #[test]
    fn test_into_output_preserves_order() {
        let mut state: LoopState<u32> = LoopState::new("q");
        state.record_success(1, "a".to_string(), "* a".to_string());
        state.record_success(2, "b".to_string(), "* b".to_string());
        let output = state.into_output();
        assert_eq!(output.analyses, vec![1, 2]);
        assert_eq!(output.final_summary(), "b");
        assert_eq!(output.iterations, 2);
    }
}
