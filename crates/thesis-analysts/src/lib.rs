//! Sub-agent analysts and the top-level orchestrator
//!
//! Three analysts implement [`thesis_core::Analyst`]:
//!
//! - [`EconomicAnalyst`]: macroeconomic environment research
//! - [`IndustryAnalyst`]: industry structure, competitors, and trends
//! - [`QuantitativeAnalyst`]: fundamental analysis over fetched financials
//!
//! The [`Orchestrator`] plans per-analyst queries, fans the three out in
//! parallel, and combines their reports into one investment thesis.

pub mod economic;
pub mod industry;
pub mod models;
pub mod orchestrator;
mod pipeline;
pub mod prompts;
pub mod quantitative;
mod render;

// Re-export main types
pub use economic::EconomicAnalyst;
pub use industry::IndustryAnalyst;
pub use models::{EconomicData, IndustryData};
pub use orchestrator::{Orchestrator, OrchestratorPlan};
pub use quantitative::QuantitativeAnalyst;
