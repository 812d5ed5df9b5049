//! Industry sub-agent

use crate::models::IndustryData;
use crate::pipeline::{AnalystPipeline, PipelinePrompts};
use crate::prompts;
use async_trait::async_trait;
use std::sync::Arc;
use thesis_core::{Analyst, AnalystReport, Result};
use thesis_evidence::EvidenceGateway;
use thesis_llm::ModelCaller;
use thesis_research::{LoopPrompts, ResearchConfig};

const PROMPTS: PipelinePrompts = PipelinePrompts {
    plan: prompts::INDUSTRY_PLAN_PROMPT,
    research: LoopPrompts {
        analysis: prompts::INDUSTRY_ANALYSIS_PROMPT,
        summary: prompts::INDUSTRY_SUMMARY_PROMPT,
        reflection: prompts::REFLECTION_PROMPT,
    },
    combine: prompts::INDUSTRY_COMBINE_PROMPT,
};

/// Researches industry structure, competitors, news, and trends
pub struct IndustryAnalyst {
    pipeline: AnalystPipeline,
}

impl IndustryAnalyst {
    /// Create an industry analyst with default research settings
    pub fn new(caller: Arc<ModelCaller>, gateway: Arc<EvidenceGateway>) -> Self {
        Self::with_config(caller, gateway, ResearchConfig::default())
    }

    /// Create an industry analyst with explicit research settings
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
impl Analyst for IndustryAnalyst {
    async fn analyze(&self, subject: &str) -> Result<AnalystReport> {
        self.pipeline.run::<IndustryData>(subject).await
    }

    fn name(&self) -> &str {
        "industry"
    }
}
