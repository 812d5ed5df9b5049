//! Top-level orchestrator
//!
//! Plans one query per research analyst, launches the economic, industry,
//! and quantitative analysts in parallel, and combines their three reports
//! into a single Markdown investment thesis. Every analyst must produce a
//! report; a failed or empty one fails the whole run.

use crate::prompts;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thesis_core::{Analyst, AnalystReport, Error, Result};
use thesis_llm::{ModelCaller, Schema, StructuredOutput};
use thesis_research::{fill, FanOut};
use tracing::{error, info, instrument};

type AnalystUnit = Pin<Box<dyn Future<Output = Result<AnalystReport>> + Send>>;

/// Per-analyst queries produced by the planning call
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorPlan {
    /// Query handed to the economic analyst
    #[serde(default)]
    pub economic_query: String,

    /// Query handed to the industry analyst
    #[serde(default)]
    pub industry_query: String,

    /// Key areas to analyze
    #[serde(default)]
    pub focus_points: Vec<String>,
}

impl StructuredOutput for OrchestratorPlan {
    fn schema() -> Schema {
        Schema::object(
            "Research queries for the sub-agents",
            vec![
                (
                    "economic_query",
                    Schema::string_with_default("One-sentence query for the economic analysis", ""),
                ),
                (
                    "industry_query",
                    Schema::string_with_default("One-sentence query for the industry analysis", ""),
                ),
                (
                    "focus_points",
                    Schema::array("Key areas to analyze", Schema::string("One focus area")),
                ),
            ],
        )
    }
}

/// Coordinates the three analysts and writes the investment thesis
pub struct Orchestrator {
    caller: Arc<ModelCaller>,
    economic: Arc<dyn Analyst>,
    industry: Arc<dyn Analyst>,
    quantitative: Arc<dyn Analyst>,
    fanout: FanOut,
}

impl Orchestrator {
    /// Create an orchestrator over the three analysts
    pub fn new(
        caller: Arc<ModelCaller>,
        economic: Arc<dyn Analyst>,
        industry: Arc<dyn Analyst>,
        quantitative: Arc<dyn Analyst>,
    ) -> Self {
        Self {
            caller,
            economic,
            industry,
            quantitative,
            fanout: FanOut::new(3),
        }
    }

    /// Produce the full investment thesis for a stock
    #[instrument(skip(self), fields(stock))]
    pub async fn run(&self, stock: &str) -> Result<String> {
        let plan_prompt = fill(prompts::ORCHESTRATOR_PLAN_PROMPT, &[("stock", stock)]);
        let plan: OrchestratorPlan = self
            .caller
            .generate_structured(&plan_prompt)
            .await
            .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

        // A blank planned query falls back to a generic one for the stock
        let economic_query = non_blank(plan.economic_query, || {
            format!("economic analysis for {stock}")
        });
        let industry_query = non_blank(plan.industry_query, || {
            format!("industry analysis for {stock}")
        });
        info!(%economic_query, %industry_query, "Orchestrator plan ready");

        let units: Vec<AnalystUnit> = vec![
            dispatch(Arc::clone(&self.economic), economic_query),
            dispatch(Arc::clone(&self.industry), industry_query),
            dispatch(Arc::clone(&self.quantitative), stock.to_string()),
        ];
        let results = self.fanout.run_all(units).await?;

        // Launch order is fixed: economic, industry, quantitative
        let mut reports = Vec::with_capacity(results.len());
        for (analyst, result) in ["economic", "industry", "quantitative"]
            .into_iter()
            .zip(results)
        {
            let report = result.map_err(|e| {
                error!(analyst, "Analyst failed: {e}");
                e
            })?;
            if report.narrative.is_empty() {
                return Err(Error::MissingReport(analyst.to_string()));
            }
            reports.push(report);
        }

        let combine_prompt = fill(prompts::COMBINE_ANALYSES_PROMPT, &[
            ("economic_analysis", &reports[0].narrative),
            ("industry_analysis", &reports[1].narrative),
            ("quantitative_analysis", &reports[2].narrative),
            ("stock", stock),
        ]);
        self.caller
            .generate_text(&combine_prompt)
            .await
            .map_err(|e| Error::ProcessingFailed(e.to_string()))
    }
}

fn dispatch(analyst: Arc<dyn Analyst>, subject: String) -> AnalystUnit {
    Box::pin(async move { analyst.analyze(&subject).await })
}

fn non_blank(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.trim().is_empty() {
        fallback()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use thesis_llm::{
        CallerConfig, CompletionRequest, CompletionResponse, ModelProvider, TokenUsage,
    };

    struct FixedAnalyst {
        name: &'static str,
        narrative: &'static str,
    }

    #[async_trait]
    impl Analyst for FixedAnalyst {
        async fn analyze(&self, _subject: &str) -> Result<AnalystReport> {
            Ok(AnalystReport::new(self.narrative))
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    struct FailingAnalyst;

    #[async_trait]
    impl Analyst for FailingAnalyst {
        async fn analyze(&self, _subject: &str) -> Result<AnalystReport> {
            Err(Error::ProcessingFailed("research loop aborted".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct EmptyAnalyst;

    #[async_trait]
    impl Analyst for EmptyAnalyst {
        async fn analyze(&self, _subject: &str) -> Result<AnalystReport> {
            Ok(AnalystReport::default())
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    /// First reply is the plan; every later prompt is echoed back
    struct PlanThenEcho {
        plan: Mutex<Option<String>>,
    }

    impl PlanThenEcho {
        fn new(plan: &str) -> Self {
            Self {
                plan: Mutex::new(Some(plan.to_string())),
            }
        }
    }

    #[async_trait]
    impl ModelProvider for PlanThenEcho {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> thesis_llm::Result<CompletionResponse> {
            let text = match self.plan.lock().expect("lock").take() {
                Some(plan) => plan,
                None => request
                    .messages
                    .first()
                    .map(|m| m.content.clone())
                    .unwrap_or_default(),
            };
            Ok(CompletionResponse {
                text,
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "plan-then-echo"
        }
    }

    fn caller(plan: &str) -> Arc<ModelCaller> {
        Arc::new(ModelCaller::new(
            Arc::new(PlanThenEcho::new(plan)),
            CallerConfig::default(),
        ))
    }

    const PLAN: &str = r#"{"economic_query": "economic analysis of ACME",
        "industry_query": "industry analysis of ACME", "focus_points": []}"#;

    #[tokio::test]
    async fn test_thesis_combines_all_three_reports() {
        let orchestrator = Orchestrator::new(
            caller(PLAN),
            Arc::new(FixedAnalyst {
                name: "economic",
                narrative: "ECONOMIC-REPORT",
            }),
            Arc::new(FixedAnalyst {
                name: "industry",
                narrative: "INDUSTRY-REPORT",
            }),
            Arc::new(FixedAnalyst {
                name: "quantitative",
                narrative: "QUANT-REPORT",
            }),
        );

        let thesis = orchestrator.run("ACME").await.expect("thesis");
        assert!(thesis.contains("ECONOMIC-REPORT"));
        assert!(thesis.contains("INDUSTRY-REPORT"));
        assert!(thesis.contains("QUANT-REPORT"));
        assert!(thesis.contains("ACME"));
    }

    #[tokio::test]
    async fn test_failed_analyst_fails_the_run() {
        let orchestrator = Orchestrator::new(
            caller(PLAN),
            Arc::new(FixedAnalyst {
                name: "economic",
                narrative: "ok",
            }),
            Arc::new(FailingAnalyst),
            Arc::new(FixedAnalyst {
                name: "quantitative",
                narrative: "ok",
            }),
        );

        let err = orchestrator.run("ACME").await.expect_err("failure");
        assert!(matches!(err, Error::ProcessingFailed(_)));
    }

    #[tokio::test]
    async fn test_empty_report_is_missing() {
        let orchestrator = Orchestrator::new(
            caller(PLAN),
            Arc::new(EmptyAnalyst),
            Arc::new(FixedAnalyst {
                name: "industry",
                narrative: "ok",
            }),
            Arc::new(FixedAnalyst {
                name: "quantitative",
                narrative: "ok",
            }),
        );

        let err = orchestrator.run("ACME").await.expect_err("missing");
        match err {
            Error::MissingReport(name) => assert_eq!(name, "economic"),
            other => panic!("expected MissingReport, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_blank_plan_queries_fall_back() {
        let orchestrator = Orchestrator::new(
            caller(r#"{"economic_query": "", "industry_query": "", "focus_points": []}"#),
            Arc::new(FixedAnalyst {
                name: "economic",
                narrative: "econ",
            }),
            Arc::new(FixedAnalyst {
                name: "industry",
                narrative: "ind",
            }),
            Arc::new(FixedAnalyst {
                name: "quantitative",
                narrative: "quant",
            }),
        );

        // Fallback queries keep the run alive
        let thesis = orchestrator.run("ACME").await.expect("thesis");
        assert!(thesis.contains("econ"));
    }
}
