//! Structured decisions requested from the model
//!
//! [`ResearchPlan`] shapes the planning call that precedes a fan-out, and
//! [`Reflection`] shapes the judgment call between iterations. Both carry
//! schema defaults so a partially-filled model reply still deserializes.

use serde::{Deserialize, Serialize};
use thesis_llm::{Schema, StructuredOutput};

/// Hard cap on planned search queries per analyst
pub const MAX_PLANNED_QUERIES: usize = 5;

/// A research plan: focus areas and the queries to fan out over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchPlan {
    /// Themes the analysis should cover
    #[serde(default)]
    pub focus_areas: Vec<String>,

    /// Search queries, one research unit each (capped at launch)
    #[serde(default)]
    pub search_queries: Vec<String>,

    /// Specific points the final analysis must address
    #[serde(default)]
    pub analysis_points: Vec<String>,
}

impl ResearchPlan {
    /// Queries to launch, silently truncated to [`MAX_PLANNED_QUERIES`]
    pub fn capped_queries(&self) -> &[String] {
        let n = self.search_queries.len().min(MAX_PLANNED_QUERIES);
        &self.search_queries[..n]
    }
}

impl StructuredOutput for ResearchPlan {
    fn schema() -> Schema {
        Schema::object(
            "A research plan with focus areas and search queries",
            vec![
                (
                    "focus_areas",
                    Schema::array(
                        "Key themes the research should cover",
                        Schema::string("One focus area"),
                    ),
                ),
                (
                    "search_queries",
                    Schema::array(
                        "Web search queries to execute, most important first",
                        Schema::string("One search query"),
                    ),
                ),
                (
                    "analysis_points",
                    Schema::array(
                        "Specific points the analysis must address",
                        Schema::string("One analysis point"),
                    ),
                ),
            ],
        )
    }
}

/// Verdict on whether a unit's accumulated findings suffice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reflection {
    /// True when the findings answer the query
    #[serde(default)]
    pub sufficient: bool,

    /// A sharper query for the next iteration; blank means none suggested
    #[serde(default)]
    pub refined_query: String,
}

impl StructuredOutput for Reflection {
    fn schema() -> Schema {
        Schema::object(
            "Judgment on whether the current findings are sufficient",
            vec![
                (
                    "sufficient",
                    Schema::boolean_with_default(
                        "Whether the findings fully answer the research query",
                        false,
                    ),
                ),
                (
                    "refined_query",
                    Schema::string_with_default(
                        "A refined search query to fill the gaps, if any",
                        "",
                    ),
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_capped_at_five() {
        let plan = ResearchPlan {
            focus_areas: vec![],
            search_queries: (0..8).map(|i| format!("q{i}")).collect(),
            analysis_points: vec![],
        };
        assert_eq!(plan.capped_queries().len(), MAX_PLANNED_QUERIES);
        assert_eq!(plan.capped_queries()[0], "q0");
        assert_eq!(plan.capped_queries()[4], "q4");
    }

    #[test]
    fn test_short_plans_pass_through() {
        let plan = ResearchPlan {
            focus_areas: vec![],
            search_queries: vec!["only".to_string()],
            analysis_points: vec![],
        };
        assert_eq!(plan.capped_queries(), ["only".to_string()]);
    }

    #[test]
    fn test_reflection_defaults() {
        let mut value = serde_json::json!({});
        Reflection::schema().apply_defaults(&mut value);
        let reflection: Reflection = serde_json::from_value(value).expect("reflection");
        assert!(!reflection.sufficient);
        assert_eq!(reflection.refined_query, "");
    }
}
