//! Industry analysis payload

use serde::{Deserialize, Serialize};
use thesis_llm::{Schema, StructuredOutput};
use thesis_research::MergeOrdered;

const UNKNOWN: &str = "Unknown";

/// One industry news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    /// Title of the news article
    pub title: String,

    /// Content of the news article
    pub content: String,

    /// Source of the news
    pub source: String,

    /// Publication date
    pub date: String,
}

impl Default for NewsItem {
    fn default() -> Self {
        Self {
            title: "No title".to_string(),
            content: "No content".to_string(),
            source: "No source".to_string(),
            date: "No date".to_string(),
        }
    }
}

impl NewsItem {
    fn schema() -> Schema {
        Schema::object(
            "One industry news item",
            vec![
                ("title", Schema::string_with_default("Title of the news article", "No title")),
                ("content", Schema::string_with_default("Content of the news article", "No content")),
                ("source", Schema::string_with_default("Source of the news", "No source")),
                ("date", Schema::string_with_default("Publication date", "No date")),
            ],
        )
    }
}

/// One forward-looking industry projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionItem {
    /// Details of the projection
    pub description: String,

    /// Timeframe for the projection
    pub timeframe: String,

    /// Likelihood of the projection
    pub likelihood: String,
}

impl Default for ProjectionItem {
    fn default() -> Self {
        Self {
            description: "No description".to_string(),
            timeframe: "No timeframe".to_string(),
            likelihood: "No likelihood".to_string(),
        }
    }
}

impl ProjectionItem {
    fn schema() -> Schema {
        Schema::object(
            "One industry projection",
            vec![
                ("description", Schema::string_with_default("Details of the projection", "No description")),
                ("timeframe", Schema::string_with_default("Timeframe for the projection", "No timeframe")),
                ("likelihood", Schema::string_with_default("Likelihood of the projection", "No likelihood")),
            ],
        )
    }
}

/// One industry risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskItem {
    /// Title of the risk
    pub title: String,

    /// Description of the risk
    pub description: String,

    /// Severity level of the risk
    pub severity: String,

    /// Potential mitigation strategies
    pub mitigation: String,
}

impl Default for RiskItem {
    fn default() -> Self {
        Self {
            title: "No title".to_string(),
            description: "No description".to_string(),
            severity: "No severity".to_string(),
            mitigation: "No mitigation".to_string(),
        }
    }
}

impl RiskItem {
    fn schema() -> Schema {
        Schema::object(
            "One industry risk",
            vec![
                ("title", Schema::string_with_default("Title of the risk", "No title")),
                ("description", Schema::string_with_default("Description of the risk", "No description")),
                ("severity", Schema::string_with_default("Severity level of the risk", "No severity")),
                ("mitigation", Schema::string_with_default("Potential mitigation strategies", "No mitigation")),
            ],
        )
    }
}

/// One competitor profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorItem {
    /// Name of the competitor
    pub name: String,

    /// Description of the competitor
    pub description: String,

    /// Key strengths
    pub strengths: Vec<String>,

    /// Key weaknesses
    pub weaknesses: Vec<String>,
}

impl Default for CompetitorItem {
    fn default() -> Self {
        Self {
            name: "No name".to_string(),
            description: "No description".to_string(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        }
    }
}

impl CompetitorItem {
    fn schema() -> Schema {
        Schema::object(
            "One competitor profile",
            vec![
                ("name", Schema::string_with_default("Name of the competitor", "No name")),
                ("description", Schema::string_with_default("Description of the competitor", "No description")),
                ("strengths", Schema::array("Key strengths", Schema::string("One strength"))),
                ("weaknesses", Schema::array("Key weaknesses", Schema::string("One weakness"))),
            ],
        )
    }
}

/// One of Porter's five competitive forces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortersForce {
    /// Which force (e.g. "Threat of new entrants")
    pub force: String,

    /// Assessed intensity (Low, Medium, High)
    pub intensity: String,

    /// Supporting analysis
    pub analysis: String,
}

impl Default for PortersForce {
    fn default() -> Self {
        Self {
            force: "No force".to_string(),
            intensity: "Medium".to_string(),
            analysis: "No analysis".to_string(),
        }
    }
}

impl PortersForce {
    fn schema() -> Schema {
        Schema::object(
            "One of Porter's five forces",
            vec![
                ("force", Schema::string_with_default("Which competitive force", "No force")),
                ("intensity", Schema::string_with_default("Assessed intensity: Low, Medium, or High", "Medium")),
                ("analysis", Schema::string_with_default("Supporting analysis", "No analysis")),
            ],
        )
    }
}

/// Headline industry metrics (scalar block, last unit wins on merge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryMetrics {
    /// Total addressable market size
    pub market_size: String,

    /// Industry growth rate
    pub growth_rate: String,

    /// Market concentration (e.g. fragmented, oligopoly)
    pub concentration: String,

    /// Typical industry profitability
    pub profitability: String,
}

impl Default for IndustryMetrics {
    fn default() -> Self {
        Self {
            market_size: UNKNOWN.to_string(),
            growth_rate: UNKNOWN.to_string(),
            concentration: UNKNOWN.to_string(),
            profitability: UNKNOWN.to_string(),
        }
    }
}

impl IndustryMetrics {
    fn schema() -> Schema {
        Schema::object(
            "Headline industry metrics",
            vec![
                ("market_size", Schema::string_with_default("Total addressable market size", UNKNOWN)),
                ("growth_rate", Schema::string_with_default("Industry growth rate", UNKNOWN)),
                ("concentration", Schema::string_with_default("Market concentration", UNKNOWN)),
                ("profitability", Schema::string_with_default("Typical industry profitability", UNKNOWN)),
            ],
        )
    }
}

/// Full industry analysis payload
///
/// Overview, classification, and metrics are scalar blocks (last unit wins
/// on merge); the remaining collections concatenate across units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryData {
    /// Executive summary of the industry
    pub overview: String,

    /// Industry classification (GICS/NAICS)
    pub classification: String,

    /// Headline industry metrics
    pub metrics: IndustryMetrics,

    /// Porter's five forces assessment
    pub porters_forces: Vec<PortersForce>,

    /// Emerging industry trends
    pub trends: Vec<String>,

    /// Latest industry news
    pub news: Vec<NewsItem>,

    /// Future industry projections
    pub projections: Vec<ProjectionItem>,

    /// Industry risks
    pub risks: Vec<RiskItem>,

    /// Key competitors
    pub competitors: Vec<CompetitorItem>,
}

impl StructuredOutput for IndustryData {
    fn schema() -> Schema {
        Schema::object(
            "Industry analysis data",
            vec![
                ("overview", Schema::string_with_default("Executive summary of the industry", "")),
                ("classification", Schema::string_with_default("Industry classification (GICS/NAICS)", "")),
                ("metrics", IndustryMetrics::schema()),
                ("porters_forces", Schema::array("Porter's five forces assessment", PortersForce::schema())),
                ("trends", Schema::array("Emerging industry trends", Schema::string("One trend"))),
                ("news", Schema::array("Latest industry news", NewsItem::schema())),
                ("projections", Schema::array("Future industry projections", ProjectionItem::schema())),
                ("risks", Schema::array("Industry risks", RiskItem::schema())),
                ("competitors", Schema::array("Key competitors", CompetitorItem::schema())),
            ],
        )
    }
}

impl MergeOrdered for IndustryData {
    fn merge_from(&mut self, later: Self) {
        self.overview = later.overview;
        self.classification = later.classification;
        self.metrics = later.metrics;
        self.porters_forces.extend(later.porters_forces);
        self.trends.extend(later.trends);
        self.news.extend(later.news);
        self.projections.extend(later.projections);
        self.risks.extend(later.risks);
        self.competitors.extend(later.competitors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_reply_fills_defaults() {
        let mut value = serde_json::json!({
            "overview": "Consolidating market",
            "news": [{"title": "Merger announced"}]
        });
        IndustryData::schema().apply_defaults(&mut value);
        assert!(IndustryData::schema().validate(&value).is_ok());

        let data: IndustryData = serde_json::from_value(value).expect("data");
        assert_eq!(data.overview, "Consolidating market");
        assert_eq!(data.metrics.market_size, "Unknown");
        assert_eq!(data.news.len(), 1);
        assert_eq!(data.news[0].source, "No source");
    }

    #[test]
    fn test_merge_lists_concatenate_in_launch_order() {
        let first = IndustryData {
            overview: "first".to_string(),
            trends: vec!["AI adoption".to_string()],
            news: vec![NewsItem {
                title: "A".to_string(),
                ..NewsItem::default()
            }],
            ..IndustryData::default()
        };
        let second = IndustryData {
            overview: "second".to_string(),
            trends: vec!["consolidation".to_string()],
            news: vec![NewsItem {
                title: "B".to_string(),
                ..NewsItem::default()
            }],
            ..IndustryData::default()
        };

        let merged = IndustryData::merge(vec![first, second]);
        assert_eq!(merged.overview, "second");
        assert_eq!(merged.trends, vec!["AI adoption", "consolidation"]);
        assert_eq!(merged.news[0].title, "A");
        assert_eq!(merged.news[1].title, "B");
    }

    #[test]
    fn test_merge_empty_yields_default() {
        let merged = IndustryData::merge(vec![]);
        assert_eq!(merged, IndustryData::default());
    }
}
