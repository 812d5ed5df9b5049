//! The bounded iterate-reflect-refine research loop
//!
//! One [`ResearchLoop::run`] call drives a single research unit to
//! completion. Each iteration searches the current query, produces a
//! structured analysis and an updated summary, then (when budget remains)
//! asks the model whether the findings suffice. The loop always terminates
//! within the configured iteration bound: a sufficient verdict or an empty
//! refinement fast-forwards the counter to the bound, and a failed search
//! consumes an iteration without producing anything.

use crate::error::Result;
use crate::plan::Reflection;
use crate::state::{LoopOutput, LoopPhase, LoopState};
use crate::template::fill;
use std::sync::Arc;
use thesis_evidence::{EvidenceGateway, SearchOutcome};
use thesis_llm::{ModelCaller, StructuredOutput};
use tracing::{debug, instrument, warn};

/// Tuning knobs for a research loop
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// Maximum iterations per unit
    pub max_iterations: u32,

    /// Raw-content budget per source when formatting evidence
    pub max_tokens_per_source: usize,

    /// Whether formatted evidence includes full page content
    pub include_raw_content: bool,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2,
            max_tokens_per_source: 10_000,
            include_raw_content: true,
        }
    }
}

/// Prompt templates for the three model calls a loop iteration makes
///
/// `analysis` sees `{query}` and `{formatted_results}`; `summary` sees
/// `{current_summary}` and `{formatted_results}`; `reflection` sees
/// `{query}` and `{current_summary}`.
#[derive(Debug, Clone, Copy)]
pub struct LoopPrompts {
    /// Extract a structured analysis from search results
    pub analysis: &'static str,

    /// Integrate new results into the running summary
    pub summary: &'static str,

    /// Judge sufficiency and propose a refined query
    pub reflection: &'static str,
}

/// Driver for one research unit
///
/// Cheap to clone; fan-out coordinators clone one loop per unit.
#[derive(Clone)]
pub struct ResearchLoop {
    caller: Arc<ModelCaller>,
    gateway: Arc<EvidenceGateway>,
    prompts: LoopPrompts,
    config: ResearchConfig,
}

impl ResearchLoop {
    /// Create a loop over the given caller and gateway
    pub fn new(
        caller: Arc<ModelCaller>,
        gateway: Arc<EvidenceGateway>,
        prompts: LoopPrompts,
        config: ResearchConfig,
    ) -> Self {
        Self {
            caller,
            gateway,
            prompts,
            config,
        }
    }

    /// Run one unit to completion for an initial query
    ///
    /// Failed searches are tolerated (the unit's output may be empty);
    /// model errors, including repeated schema violations, abort the unit.
    #[instrument(skip(self), fields(query = %initial_query))]
    pub async fn run<T>(&self, initial_query: String) -> Result<LoopOutput<T>>
    where
        T: StructuredOutput + Send,
    {
        let bound = self.config.max_iterations;
        let mut state: LoopState<T> = LoopState::new(initial_query);
        let mut phase = LoopPhase::Researching;

        while phase != LoopPhase::Done {
            phase = match phase {
                LoopPhase::Researching => self.research_step(&mut state).await?,
                LoopPhase::Reflecting => self.reflect_step(&mut state, bound).await?,
                LoopPhase::Done => LoopPhase::Done,
            };
        }

        debug!(
            iterations = state.iteration,
            analyses = state.analyses.len(),
            "Research unit complete"
        );
        Ok(state.into_output())
    }

    /// Search, analyze, and summarize the current query
    async fn research_step<T>(&self, state: &mut LoopState<T>) -> Result<LoopPhase>
    where
        T: StructuredOutput + Send,
    {
        match self.gateway.search(&state.query).await {
            SearchOutcome::Found(bundle) => {
                let formatted = bundle.formatted(
                    self.config.max_tokens_per_source,
                    self.config.include_raw_content,
                );

                let analysis_prompt = fill(self.prompts.analysis, &[
                    ("query", &state.query),
                    ("formatted_results", &formatted),
                ]);
                let analysis: T = self.caller.generate_structured(&analysis_prompt).await?;

                let summary_prompt = fill(self.prompts.summary, &[
                    ("current_summary", state.latest_summary()),
                    ("formatted_results", &formatted),
                ]);
                let summary = self.caller.generate_text(&summary_prompt).await?;

                state.record_success(analysis, summary, bundle.bullet_list());
            }
            SearchOutcome::Empty | SearchOutcome::Failed(_) => {
                // The iteration is spent either way; the unit may end empty
                warn!(query = %state.query, "Search produced no evidence");
                state.record_failure();
            }
        }

        if state.iteration < self.config.max_iterations {
            Ok(LoopPhase::Reflecting)
        } else {
            Ok(LoopPhase::Done)
        }
    }

    /// Ask the model whether the findings suffice; refine or stop
    async fn reflect_step<T>(&self, state: &mut LoopState<T>, bound: u32) -> Result<LoopPhase> {
        let reflection_prompt = fill(self.prompts.reflection, &[
            ("query", &state.query),
            ("current_summary", state.latest_summary()),
        ]);
        let verdict: Reflection = self.caller.generate_structured(&reflection_prompt).await?;

        if verdict.sufficient || verdict.refined_query.trim().is_empty() {
            // Fast-forward so the consumed budget is observable downstream
            debug!(
                sufficient = verdict.sufficient,
                "Findings judged final, stopping early"
            );
            state.iteration = bound;
            Ok(LoopPhase::Done)
        } else {
            state.query = verdict.refined_query;
            Ok(LoopPhase::Researching)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use thesis_evidence::{EvidenceError, SearchProvider, SearchRequest, Source};
    use thesis_llm::{
        CallerConfig, CompletionRequest, CompletionResponse, ModelProvider, Schema, TokenUsage,
    };

    const PROMPTS: LoopPrompts = LoopPrompts {
        analysis: "analyze {query} with {formatted_results}",
        summary: "extend {current_summary} with {formatted_results}",
        reflection: "judge {query} given {current_summary}",
    };

    #[derive(Debug, Clone, Deserialize)]
    struct Finding {
        headline: String,
    }

    impl StructuredOutput for Finding {
        fn schema() -> Schema {
            Schema::object(
                "A finding",
                vec![(
                    "headline",
                    Schema::string_with_default("Headline", "none"),
                )],
            )
        }
    }

    /// Search provider that counts calls and replays canned outcomes
    struct CannedSearch {
        responses: Mutex<Vec<std::result::Result<Vec<Source>, String>>>,
        calls: AtomicUsize,
    }

    impl CannedSearch {
        fn new(responses: Vec<std::result::Result<Vec<Source>, String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn always(sources: Vec<Source>) -> Self {
            Self::new(vec![Ok(sources.clone()), Ok(sources)])
        }
    }

    #[async_trait]
    impl SearchProvider for CannedSearch {
        async fn search(
            &self,
            _query: &str,
            _request: &SearchRequest,
        ) -> thesis_evidence::Result<Vec<Source>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.lock().expect("lock").pop() {
                Some(Ok(sources)) => Ok(sources),
                Some(Err(reason)) => Err(EvidenceError::ProviderError(reason)),
                None => Ok(vec![]),
            }
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    /// Model provider replaying canned text responses
    struct ScriptedModel {
        responses: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().map(String::from).collect()),
            }
        }
    }

    #[async_trait]
    impl ModelProvider for ScriptedModel {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> thesis_llm::Result<CompletionResponse> {
            let text = self
                .responses
                .lock()
                .expect("lock")
                .pop()
                .unwrap_or_else(|| "out of script".to_string());
            Ok(CompletionResponse {
                text,
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn source(url: &str) -> Source {
        Source {
            title: "T".to_string(),
            url: url.to_string(),
            content: "content".to_string(),
            raw_content: None,
        }
    }

    fn research_loop(search: CannedSearch, model: ScriptedModel) -> ResearchLoop {
        ResearchLoop::new(
            Arc::new(ModelCaller::new(Arc::new(model), CallerConfig::default())),
            Arc::new(EvidenceGateway::new(Arc::new(search))),
            PROMPTS,
            ResearchConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_sufficient_verdict_stops_after_one_iteration() {
        let search = CannedSearch::always(vec![source("https://a")]);
        let model = ScriptedModel::new(vec![
            r#"{"headline": "found"}"#,
            "summary one",
            r#"{"sufficient": true, "refined_query": ""}"#,
        ]);
        let output: LoopOutput<Finding> = research_loop(search, model)
            .run("initial".to_string())
            .await
            .expect("output");

        assert_eq!(output.analyses.len(), 1);
        assert_eq!(output.analyses[0].headline, "found");
        assert_eq!(output.summaries, vec!["summary one".to_string()]);
        assert_eq!(output.source_logs.len(), 1);
        // Stopping early still reports the full iteration budget as spent
        assert_eq!(output.iterations, 2);
    }

    #[tokio::test]
    async fn test_insufficient_verdict_refines_and_iterates_to_bound() {
        let search = CannedSearch::always(vec![source("https://a")]);
        let model = ScriptedModel::new(vec![
            r#"{"headline": "first"}"#,
            "summary one",
            r#"{"sufficient": false, "refined_query": "sharper question"}"#,
            r#"{"headline": "second"}"#,
            "summary two",
        ]);
        let output: LoopOutput<Finding> = research_loop(search, model)
            .run("initial".to_string())
            .await
            .expect("output");

        // Two iterations, no reflection after the last one
        assert_eq!(output.analyses.len(), 2);
        assert_eq!(output.final_summary(), "summary two");
    }

    #[tokio::test]
    async fn test_blank_refinement_stops_early() {
        let search = CannedSearch::always(vec![source("https://a")]);
        let model = ScriptedModel::new(vec![
            r#"{"headline": "only"}"#,
            "summary",
            r#"{"sufficient": false, "refined_query": "   "}"#,
        ]);
        let output: LoopOutput<Finding> = research_loop(search, model)
            .run("initial".to_string())
            .await
            .expect("output");

        assert_eq!(output.analyses.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_search_consumes_iteration_silently() {
        let search = CannedSearch::new(vec![
            Err("search backend down".to_string()),
            Ok(vec![source("https://a")]),
        ]);
        // First iteration fails before any model call, so the script starts
        // at the reflection for iteration one
        let model = ScriptedModel::new(vec![
            r#"{"sufficient": false, "refined_query": "retry"}"#,
            r#"{"headline": "recovered"}"#,
            "summary after recovery",
        ]);
        let output: LoopOutput<Finding> = research_loop(search, model)
            .run("initial".to_string())
            .await
            .expect("output");

        assert_eq!(output.analyses.len(), 1);
        assert_eq!(output.analyses[0].headline, "recovered");
    }

    #[tokio::test]
    async fn test_all_searches_failing_yields_empty_output() {
        let search = CannedSearch::new(vec![Err("down".to_string()), Err("down".to_string())]);
        let model = ScriptedModel::new(vec![
            r#"{"sufficient": false, "refined_query": "again"}"#,
        ]);
        let output: LoopOutput<Finding> = research_loop(search, model)
            .run("initial".to_string())
            .await
            .expect("output");

        assert!(output.analyses.is_empty());
        assert!(output.summaries.is_empty());
        assert_eq!(output.final_summary(), "");
        assert_eq!(output.iterations, 2);
    }

    #[tokio::test]
    async fn test_search_count_never_exceeds_bound() {
        let search = Arc::new(CannedSearch::new(vec![
            Ok(vec![source("https://a")]),
            Ok(vec![source("https://b")]),
            Ok(vec![source("https://c")]),
        ]));
        let caller = Arc::new(ModelCaller::new(
            Arc::new(ScriptedModel::new(vec![
                r#"{"headline": "one"}"#,
                "s1",
                r#"{"sufficient": false, "refined_query": "next"}"#,
                r#"{"headline": "two"}"#,
                "s2",
            ])),
            CallerConfig::default(),
        ));
        let gateway = Arc::new(EvidenceGateway::new(
            Arc::clone(&search) as Arc<dyn SearchProvider>
        ));
        let research = ResearchLoop::new(caller, gateway, PROMPTS, ResearchConfig {
            max_iterations: 2,
            ..ResearchConfig::default()
        });

        let output: LoopOutput<Finding> =
            research.run("initial".to_string()).await.expect("output");
        assert_eq!(output.analyses.len(), 2);
        assert_eq!(search.calls.load(Ordering::SeqCst), 2);
    }
}
