//! Shared plan / fan-out / aggregate pipeline
//!
//! The economic and industry analysts differ only in their prompts and
//! payload type; this pipeline holds everything else. One run plans the
//! queries, launches one research unit per query, waits at the join
//! barrier, and aggregates the outputs into a rendered report.

use crate::render;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use thesis_core::AnalystReport;
use thesis_evidence::EvidenceGateway;
use thesis_llm::{ModelCaller, StructuredOutput};
use thesis_research::{
    fill, Aggregator, FanOut, LoopOutput, LoopPrompts, MergeOrdered, ResearchConfig,
    ResearchLoop, ResearchPlan, MAX_PLANNED_QUERIES,
};
use tracing::{debug, info, instrument};

/// Prompt set distinguishing one analyst from another
#[derive(Debug, Clone, Copy)]
pub(crate) struct PipelinePrompts {
    /// Planning template; sees `{topic}` and `{date}`
    pub plan: &'static str,

    /// Per-iteration loop templates
    pub research: LoopPrompts,

    /// Aggregation template; sees `{summaries}`, `{combined_analysis}`, `{topic}`
    pub combine: &'static str,
}

pub(crate) struct AnalystPipeline {
    caller: Arc<ModelCaller>,
    research: ResearchLoop,
    aggregator: Aggregator,
    fanout: FanOut,
    prompts: PipelinePrompts,
}

impl AnalystPipeline {
    pub(crate) fn new(
        caller: Arc<ModelCaller>,
        gateway: Arc<EvidenceGateway>,
        prompts: PipelinePrompts,
        config: ResearchConfig,
    ) -> Self {
        let research = ResearchLoop::new(
            Arc::clone(&caller),
            gateway,
            prompts.research,
            config,
        );
        Self {
            aggregator: Aggregator::new(Arc::clone(&caller)),
            fanout: FanOut::new(MAX_PLANNED_QUERIES),
            caller,
            research,
            prompts,
        }
    }

    /// Plan, fan out, aggregate, and render one analyst run
    #[instrument(skip(self), fields(topic))]
    pub(crate) async fn run<T>(&self, topic: &str) -> thesis_core::Result<AnalystReport>
    where
        T: StructuredOutput + MergeOrdered + Serialize + Send + 'static,
    {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let plan_prompt = fill(self.prompts.plan, &[("topic", topic), ("date", &date)]);
        let plan: ResearchPlan = self
            .caller
            .generate_structured(&plan_prompt)
            .await
            .map_err(|e| thesis_core::Error::ProcessingFailed(e.to_string()))?;

        let queries = plan.capped_queries();
        info!(queries = queries.len(), "Research plan ready");

        let units: Vec<_> = queries
            .iter()
            .cloned()
            .map(|query| {
                let research = self.research.clone();
                async move { research.run::<T>(query).await }
            })
            .collect();

        let results = self.fanout.run_all(units).await?;
        let mut outputs: Vec<LoopOutput<T>> = Vec::with_capacity(results.len());
        for result in results {
            outputs.push(result?);
        }

        let aggregated = self
            .aggregator
            .aggregate(outputs, topic, self.prompts.combine)
            .await?;
        debug!(sources = aggregated.sources.len(), "Analyst run aggregated");

        Ok(
            AnalystReport::new(render::analysis_report(
                &aggregated.narrative,
                &aggregated.sources,
            ))
            .with_sources(aggregated.sources),
        )
    }
}
