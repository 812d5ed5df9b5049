//! Command-line interface for thesis-rs

use clap::Parser;
use std::sync::Arc;
use thesis_analysts::{EconomicAnalyst, IndustryAnalyst, Orchestrator, QuantitativeAnalyst};
use thesis_evidence::{EvidenceGateway, QuickFsClient, TavilyClient};
use thesis_llm::providers::GeminiProvider;
use thesis_llm::{CallerConfig, ModelCaller};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "thesis-cli")]
#[command(about = "Multi-agent investment research", long_about = None)]
struct Args {
    /// Stock to research (e.g. "AAPL" or "Commonwealth Bank")
    stock: String,

    /// Model identifier used for every model call
    #[arg(long, default_value = "gemini-1.5-flash")]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    thesis_utils::init_tracing();

    let args = Args::parse();

    // Fail fast on missing keys before any analyst starts
    thesis_utils::require_env("GEMINI_API_KEY")?;
    thesis_utils::require_env("TAVILY_API_KEY")?;
    thesis_utils::require_env("QUICKFS_API_KEY")?;

    let caller = Arc::new(ModelCaller::new(
        Arc::new(GeminiProvider::from_env()?),
        CallerConfig {
            model: args.model,
            ..CallerConfig::default()
        },
    ));
    let gateway = Arc::new(EvidenceGateway::new(Arc::new(TavilyClient::from_env()?)));
    let financials = Arc::new(QuickFsClient::from_env()?);

    let orchestrator = Orchestrator::new(
        Arc::clone(&caller),
        Arc::new(EconomicAnalyst::new(Arc::clone(&caller), Arc::clone(&gateway))),
        Arc::new(IndustryAnalyst::new(Arc::clone(&caller), gateway)),
        Arc::new(QuantitativeAnalyst::new(caller, financials)),
    );

    info!(stock = %args.stock, "Starting research run");
    let thesis = orchestrator.run(&args.stock).await?;

    println!("{thesis}");
    Ok(())
}
