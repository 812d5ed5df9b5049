//! Research loop engine for thesis-rs
//!
//! This crate is the engineering core shared by every sub-agent:
//!
//! - [`ResearchLoop`]: the bounded iterate-reflect-refine state machine
//! - [`FanOut`]: concurrent launch of independent units with a full join
//!   barrier and launch-order results
//! - [`Aggregator`] and [`MergeOrdered`]: idempotent merge of partial
//!   results with deterministic ordering
//! - [`ResearchPlan`] and [`Reflection`]: the structured decisions the
//!   loop requests from the model

pub mod aggregate;
pub mod error;
pub mod fanout;
pub mod plan;
pub mod research;
pub mod state;
pub mod template;

// Re-export main types
pub use aggregate::{dedup_sources, Aggregated, Aggregator, MergeOrdered};
pub use error::{ResearchError, Result};
pub use fanout::FanOut;
pub use plan::{Reflection, ResearchPlan, MAX_PLANNED_QUERIES};
pub use research::{LoopPrompts, ResearchConfig, ResearchLoop};
pub use state::{LoopOutput, LoopPhase, LoopState};
pub use template::fill;
