//! Quantitative sub-agent
//!
//! Unlike the research analysts this agent does no web search: it resolves
//! the stock to a provider symbol, fetches the full financial dataset, and
//! writes a fundamental analysis over the flattened document. Symbol
//! resolution is a bounded retry loop; a failed fetch asks the model for an
//! alternative exchange format and tries again, up to three attempts.

use crate::prompts;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thesis_core::{Analyst, AnalystReport, Error, Result};
use thesis_evidence::{format_for_model, FinancialDataProvider, FormatOptions};
use thesis_llm::{ModelCaller, Schema, StructuredOutput};
use thesis_research::fill;
use tracing::{debug, info, instrument, warn};

const MAX_SYMBOL_ATTEMPTS: usize = 3;

/// Symbol the model proposes for the financial data provider
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SymbolPlan {
    #[serde(default)]
    pub symbol: String,
}

impl StructuredOutput for SymbolPlan {
    fn schema() -> Schema {
        Schema::object(
            "Stock symbol to research",
            vec![(
                "symbol",
                Schema::string_with_default(
                    "Provider symbol, e.g. AAPL:US, CBA:AU, or VOD:L",
                    "",
                ),
            )],
        )
    }
}

/// Verdict after a failed fetch: try another format or give up
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SymbolReflection {
    #[serde(default)]
    pub sufficient: bool,

    #[serde(default)]
    pub refined_symbol: String,
}

impl StructuredOutput for SymbolReflection {
    fn schema() -> Schema {
        Schema::object(
            "Judgment on the failed symbol lookup",
            vec![
                (
                    "sufficient",
                    Schema::boolean_with_default(
                        "True when likely symbol formats are exhausted",
                        false,
                    ),
                ),
                (
                    "refined_symbol",
                    Schema::string_with_default("Alternative symbol format to try", ""),
                ),
            ],
        )
    }
}

/// Analyzes company fundamentals from provider financial data
pub struct QuantitativeAnalyst {
    caller: Arc<ModelCaller>,
    provider: Arc<dyn FinancialDataProvider>,
}

impl QuantitativeAnalyst {
    /// Create a quantitative analyst over a financial data provider
    pub fn new(caller: Arc<ModelCaller>, provider: Arc<dyn FinancialDataProvider>) -> Self {
        Self { caller, provider }
    }

    async fn resolve_and_fetch(&self, stock: &str) -> Result<(String, Option<serde_json::Value>)> {
        let plan_prompt = fill(prompts::SYMBOL_PLAN_PROMPT, &[("stock", stock)]);
        let plan: SymbolPlan = self
            .caller
            .generate_structured(&plan_prompt)
            .await
            .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

        let mut symbol = if plan.symbol.trim().is_empty() {
            stock.to_string()
        } else {
            plan.symbol
        };
        let mut attempts: Vec<String> = Vec::new();

        while attempts.len() < MAX_SYMBOL_ATTEMPTS {
            match self.provider.fetch(&symbol).await {
                Ok(data) => {
                    info!(%symbol, attempts = attempts.len() + 1, "Financial data fetched");
                    return Ok((symbol, Some(data)));
                }
                Err(e) => {
                    warn!(%symbol, "Financial data fetch failed: {e}");
                    attempts.push(symbol.clone());
                    if attempts.len() >= MAX_SYMBOL_ATTEMPTS {
                        break;
                    }

                    let reflection_prompt = fill(prompts::SYMBOL_REFLECTION_PROMPT, &[
                        ("stock", stock),
                        ("symbol", &symbol),
                        ("attempt_count", &attempts.len().to_string()),
                        ("previous_attempts", &attempts.join(", ")),
                    ]);
                    let reflection: SymbolReflection = self
                        .caller
                        .generate_structured(&reflection_prompt)
                        .await
                        .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

                    if reflection.sufficient || reflection.refined_symbol.trim().is_empty() {
                        debug!("Symbol formats judged exhausted");
                        break;
                    }
                    symbol = reflection.refined_symbol;
                }
            }
        }

        Ok((symbol, None))
    }
}

#[async_trait]
impl Analyst for QuantitativeAnalyst {
    #[instrument(skip(self), fields(stock = %subject))]
    async fn analyze(&self, subject: &str) -> Result<AnalystReport> {
        let (symbol, data) = self.resolve_and_fetch(subject).await?;

        let formatted_data = match data {
            Some(document) => format_for_model(
                &document,
                "Analyse these financial metrics",
                &FormatOptions {
                    flatten_nested: true,
                    ..FormatOptions::default()
                },
            ),
            None => "No financial data available for this symbol.".to_string(),
        };

        let analysis_prompt = fill(prompts::FINANCIAL_ANALYSIS_PROMPT, &[
            ("stock", &symbol),
            ("formatted_data", &formatted_data),
        ]);
        let narrative = self
            .caller
            .generate_text(&analysis_prompt)
            .await
            .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

        Ok(AnalystReport::new(narrative))
    }

    fn name(&self) -> &str {
        "quantitative"
    }
}
