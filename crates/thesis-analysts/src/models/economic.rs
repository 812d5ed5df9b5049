//! Economic analysis payload

use serde::{Deserialize, Serialize};
use thesis_llm::{Schema, StructuredOutput};
use thesis_research::MergeOrdered;

const UNKNOWN: &str = "Unknown";

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Global economic metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalEconomics {
    /// Global GDP growth rates and trends
    pub gdp_growth: String,

    /// Global inflation rates and trends
    pub inflation: String,

    /// Major central banks' interest rates
    pub interest_rates: String,

    /// Key exchange rate movements
    pub exchange_rates: String,

    /// Trends in key commodity prices
    pub commodity_prices: String,

    /// Major geopolitical risks and impacts
    pub geopolitical_factors: String,
}

impl Default for GlobalEconomics {
    fn default() -> Self {
        Self {
            gdp_growth: unknown(),
            inflation: unknown(),
            interest_rates: unknown(),
            exchange_rates: unknown(),
            commodity_prices: unknown(),
            geopolitical_factors: unknown(),
        }
    }
}

impl GlobalEconomics {
    fn schema() -> Schema {
        Schema::object(
            "Global economic metrics",
            vec![
                ("gdp_growth", Schema::string_with_default("Global GDP growth rates and trends", UNKNOWN)),
                ("inflation", Schema::string_with_default("Global inflation rates and trends", UNKNOWN)),
                ("interest_rates", Schema::string_with_default("Major central banks' interest rates", UNKNOWN)),
                ("exchange_rates", Schema::string_with_default("Key exchange rate movements", UNKNOWN)),
                ("commodity_prices", Schema::string_with_default("Trends in key commodity prices", UNKNOWN)),
                ("geopolitical_factors", Schema::string_with_default("Major geopolitical risks and impacts", UNKNOWN)),
            ],
        )
    }
}

/// Domestic economic metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomesticEconomics {
    /// Domestic GDP growth and trends
    pub gdp_growth: String,

    /// Consumer confidence and spending
    pub consumer_spending: String,

    /// Employment and wage trends
    pub employment: String,

    /// Business investment trends
    pub investment: String,

    /// Government fiscal policies
    pub fiscal_policy: String,

    /// Central bank policies
    pub monetary_policy: String,

    /// Housing market trends
    pub housing_market: String,
}

impl Default for DomesticEconomics {
    fn default() -> Self {
        Self {
            gdp_growth: unknown(),
            consumer_spending: unknown(),
            employment: unknown(),
            investment: unknown(),
            fiscal_policy: unknown(),
            monetary_policy: unknown(),
            housing_market: unknown(),
        }
    }
}

impl DomesticEconomics {
    fn schema() -> Schema {
        Schema::object(
            "Domestic economic metrics",
            vec![
                ("gdp_growth", Schema::string_with_default("Domestic GDP growth and trends", UNKNOWN)),
                ("consumer_spending", Schema::string_with_default("Consumer confidence and spending", UNKNOWN)),
                ("employment", Schema::string_with_default("Employment and wage trends", UNKNOWN)),
                ("investment", Schema::string_with_default("Business investment trends", UNKNOWN)),
                ("fiscal_policy", Schema::string_with_default("Government fiscal policies", UNKNOWN)),
                ("monetary_policy", Schema::string_with_default("Central bank policies", UNKNOWN)),
                ("housing_market", Schema::string_with_default("Housing market trends", UNKNOWN)),
            ],
        )
    }
}

/// Industry-specific economic impacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryEconomics {
    /// Price and income elasticity
    pub demand_elasticity: String,

    /// Sensitivity to input costs
    pub input_cost_sensitivity: String,

    /// Industry pricing power
    pub pricing_power: String,

    /// Interest rate impacts
    pub interest_rate_sensitivity: String,

    /// Exchange rate impacts
    pub currency_sensitivity: String,

    /// Government subsidies and incentives
    pub government_support: String,
}

impl Default for IndustryEconomics {
    fn default() -> Self {
        Self {
            demand_elasticity: unknown(),
            input_cost_sensitivity: unknown(),
            pricing_power: unknown(),
            interest_rate_sensitivity: unknown(),
            currency_sensitivity: unknown(),
            government_support: unknown(),
        }
    }
}

impl IndustryEconomics {
    fn schema() -> Schema {
        Schema::object(
            "Industry economic impacts",
            vec![
                ("demand_elasticity", Schema::string_with_default("Price and income elasticity", UNKNOWN)),
                ("input_cost_sensitivity", Schema::string_with_default("Sensitivity to input costs", UNKNOWN)),
                ("pricing_power", Schema::string_with_default("Industry pricing power", UNKNOWN)),
                ("interest_rate_sensitivity", Schema::string_with_default("Interest rate impacts", UNKNOWN)),
                ("currency_sensitivity", Schema::string_with_default("Exchange rate impacts", UNKNOWN)),
                ("government_support", Schema::string_with_default("Government subsidies and incentives", UNKNOWN)),
            ],
        )
    }
}

/// One macroeconomic risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicRiskItem {
    /// Title of the economic risk
    pub title: String,

    /// Description of the economic risk
    pub description: String,

    /// Severity level (Low, Medium, High, Critical)
    pub severity: String,

    /// Probability of occurrence (Low, Medium, High)
    pub probability: String,

    /// Expected timeframe for risk manifestation
    pub timeframe: String,

    /// Areas of economic impact
    pub impact_areas: Vec<String>,

    /// Potential mitigation strategies
    pub mitigation: String,

    /// Key indicators to monitor
    pub indicators: Vec<String>,
}

impl Default for EconomicRiskItem {
    fn default() -> Self {
        Self {
            title: "No title".to_string(),
            description: "No description".to_string(),
            severity: "Medium".to_string(),
            probability: "Medium".to_string(),
            timeframe: unknown(),
            impact_areas: Vec::new(),
            mitigation: "No mitigation".to_string(),
            indicators: Vec::new(),
        }
    }
}

impl EconomicRiskItem {
    fn schema() -> Schema {
        Schema::object(
            "One economic risk",
            vec![
                ("title", Schema::string_with_default("Title of the economic risk", "No title")),
                ("description", Schema::string_with_default("Description of the economic risk", "No description")),
                ("severity", Schema::string_with_default("Severity level: Low, Medium, High, or Critical", "Medium")),
                ("probability", Schema::string_with_default("Probability of occurrence: Low, Medium, or High", "Medium")),
                ("timeframe", Schema::string_with_default("Expected timeframe for risk manifestation", UNKNOWN)),
                ("impact_areas", Schema::array("Areas of economic impact", Schema::string("One impact area"))),
                ("mitigation", Schema::string_with_default("Potential mitigation strategies", "No mitigation")),
                ("indicators", Schema::array("Key indicators to monitor", Schema::string("One indicator"))),
            ],
        )
    }
}

/// Full economic analysis payload
///
/// The three metric groups are scalar blocks (last unit wins on merge);
/// risks and opportunities concatenate across units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicData {
    /// Executive summary of economic conditions
    pub overview: String,

    /// Global economic metrics
    pub global_economics: GlobalEconomics,

    /// Domestic economic metrics
    pub domestic_economics: DomesticEconomics,

    /// Industry economic impacts
    pub industry_economics: IndustryEconomics,

    /// Economic risks
    pub risks: Vec<EconomicRiskItem>,

    /// Economic opportunities
    pub opportunities: Vec<String>,

    /// Economic scenarios
    pub scenarios: String,

    /// Investment implications
    pub recommendations: String,
}

impl StructuredOutput for EconomicData {
    fn schema() -> Schema {
        Schema::object(
            "Economic analysis data",
            vec![
                ("overview", Schema::string_with_default("Executive summary of economic conditions", "")),
                ("global_economics", GlobalEconomics::schema()),
                ("domestic_economics", DomesticEconomics::schema()),
                ("industry_economics", IndustryEconomics::schema()),
                ("risks", Schema::array("Economic risks", EconomicRiskItem::schema())),
                ("opportunities", Schema::array("Economic opportunities", Schema::string("One opportunity"))),
                ("scenarios", Schema::string_with_default("Economic scenarios", "")),
                ("recommendations", Schema::string_with_default("Investment implications", "")),
            ],
        )
    }
}

impl MergeOrdered for EconomicData {
    fn merge_from(&mut self, later: Self) {
        self.overview = later.overview;
        self.global_economics = later.global_economics;
        self.domestic_economics = later.domestic_economics;
        self.industry_economics = later.industry_economics;
        self.risks.extend(later.risks);
        self.opportunities.extend(later.opportunities);
        self.scenarios = later.scenarios;
        self.recommendations = later.recommendations;
    }
}
