//! Macroeconomic sub-agent

use crate::models::EconomicData;
use crate::pipeline::{AnalystPipeline, PipelinePrompts};
use crate::prompts;
use async_trait::async_trait;
use std::sync::Arc;
use thesis_core::{Analyst, AnalystReport, Result};
use thesis_evidence::EvidenceGateway;
use thesis_llm::ModelCaller;
use thesis_research::{LoopPrompts, ResearchConfig};

const PROMPTS: PipelinePrompts = PipelinePrompts {
    plan: prompts::ECONOMIC_PLAN_PROMPT,
    research: LoopPrompts {
        analysis: prompts::ECONOMIC_ANALYSIS_PROMPT,
        summary: prompts::ECONOMIC_SUMMARY_PROMPT,
        reflection: prompts::REFLECTION_PROMPT,
    },
    combine: prompts::ECONOMIC_COMBINE_PROMPT,
};

/// Researches the macroeconomic environment around a query
///
/// Plans up to five search queries, runs one bounded research loop per
/// query in parallel, and aggregates the [`EconomicData`] payloads into a
/// single economic assessment report.
pub struct EconomicAnalyst {
    pipeline: AnalystPipeline,
}

impl EconomicAnalyst {
    /// Create an economic analyst with default research settings
    pub fn new(caller: Arc<ModelCaller>, gateway: Arc<EvidenceGateway>) -> Self {
        Self::with_config(caller, gateway, ResearchConfig::default())
    }

    /// Create an economic analyst with explicit research settings
    pub fn with_config(
        caller: Arc<ModelCaller>,
        gateway: Arc<EvidenceGateway>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            pipeline: AnalystPipeline::new(caller, gateway, PROMPTS, config),
        }
    }
}

#[async_trait]
impl Analyst for EconomicAnalyst {
    async fn analyze(&self, subject: &str) -> Result<AnalystReport> {
        self.pipeline.run::<EconomicData>(subject).await
    }

    fn name(&self) -> &str {
        "economic"
    }
}
