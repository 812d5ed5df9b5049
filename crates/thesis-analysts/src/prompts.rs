//! Prompt templates for the analysts and the orchestrator
//!
//! Templates use `{name}` placeholders filled with [`thesis_research::fill`].
//! Loop templates see `{query}`, `{formatted_results}`, and
//! `{current_summary}`; combine templates see `{summaries}`,
//! `{combined_analysis}`, and `{topic}`.

// --- Economic analyst ---

pub const ECONOMIC_PLAN_PROMPT: &str = "Create a comprehensive research plan for analyzing the \
economics impacting {topic}. Today is {date}. Focus on:
1. Global economic indicators (GDP, inflation, interest rates)
2. Domestic economic conditions and policies
3. Industry-specific economic impacts and sensitivities
4. Macroeconomic risks and opportunities
5. Economic forecasts and future outlook";

pub const ECONOMIC_ANALYSIS_PROMPT: &str = "Analyze the economic environment relevant to: {query}

{formatted_results}

Structure your analysis around:
1. Global economic environment (GDP, inflation, rates, FX, commodities, geopolitics)
2. Domestic economic environment (growth, consumers, employment, policy, housing)
3. Industry-specific economic impacts (elasticity, costs, pricing power, rate and currency sensitivity)
4. Risks and opportunities with scenarios
5. Investment implications";

pub const ECONOMIC_SUMMARY_PROMPT: &str = "Based on the existing analysis and new findings, \
create a comprehensive economic assessment (~800 words).

Current Analysis: {current_summary}
New Findings: {formatted_results}

Use these sections: Executive Summary, Global Economic Environment, Domestic Economic \
Environment, Industry-Specific Economic Impacts, Economic Risks and Opportunities, and \
Investment Implications. Support each section with specific data points and forward-looking \
indicators, and integrate the new findings with the existing analysis into one clear narrative.";

pub const ECONOMIC_COMBINE_PROMPT: &str = "Synthesize these economic analyses into a \
comprehensive report:

Summaries: {summaries}

Combined analyses: {combined_analysis}

Create a detailed economic assessment (~1200 words) for {topic} covering the executive summary, \
global and domestic economic environments, industry-specific impacts, risk-opportunity \
assessment, and investment conclusions. Use ## for section titles (Markdown). Base the analysis \
on facts and cited evidence, keep a neutral professional tone, and back insights with numbers \
and statistics only when available.";

// --- Industry analyst ---

pub const INDUSTRY_PLAN_PROMPT: &str = "Create a comprehensive research plan for analyzing the \
{topic} industry. Today is {date}. Focus on:
1. Industry structure and market dynamics
2. Competitive landscape and market shares
3. Growth drivers and market trends
4. Regulatory environment and barriers to entry
5. Technology and innovation impact";

pub const INDUSTRY_ANALYSIS_PROMPT: &str = "Analyze this industry data for: {query}

{formatted_results}

Focus your analysis on:
1. Market structure and competitive dynamics
2. Industry growth trends and drivers
3. Key success factors and barriers to entry
4. Regulatory and technological environment
5. Future outlook and potential disruptions";

pub const INDUSTRY_SUMMARY_PROMPT: &str = "Based on the existing summary and new findings, \
create or extend a comprehensive industry analysis (~800 words).

Current Summary: {current_summary}
New Findings: {formatted_results}

Use these sections: Executive Summary, Industry Structure & Classification, Competitive \
Analysis, Market Dynamics & Performance, Operating Environment, Industry Trends & Disruption, \
Risk Assessment, and Future Outlook. Support each section with specific data points where \
available and integrate the new findings with existing knowledge into one clear narrative.";

pub const INDUSTRY_COMBINE_PROMPT: &str = "Synthesize these industry analyses into one \
comprehensive report:

Summaries: {summaries}

Combined_analysis: {combined_analysis}

Create a detailed industry analysis (~1200 words) for the {topic} industry covering the \
executive summary, industry structure and classification, competitive analysis, market dynamics \
and performance, operating environment, trends and disruption, risk assessment, and future \
outlook. Use ## for section titles (Markdown). Apply established frameworks such as Porter's \
Five Forces where they add clarity, stay objective, and back insights with numbers and \
statistics only when available.";

// --- Shared reflection ---

pub const REFLECTION_PROMPT: &str = "Reflect on the research using this search query:
{query}

Current Knowledge: {current_summary}

If more research is needed for the same query, propose a refined query and set sufficient to \
false (limit the query to at most 10 words). Otherwise confirm the query is sufficient by \
setting it to true.";

// --- Quantitative analyst ---

pub const SYMBOL_PLAN_PROMPT: &str = "Generate a stock symbol to research from {stock}. \
Consider these formats:
1. US stocks: AAPL:US, AAPL.US, AAPL
2. Australian stocks: CBA:AU, CBA.AX
3. Other formats: symbol:L (London), symbol:TO (Toronto)";

pub const SYMBOL_REFLECTION_PROMPT: &str = "Given the failed attempt to fetch financial data \
for the stock {stock} using symbol {symbol}, suggest an alternative symbol format to try. \
Consider these formats:
1. US stocks: AAPL:US, AAPL.US, AAPL
2. Australian stocks: CBA:AU, CBA.AX
3. Other formats: {stock}.L (London), {stock}.TO (Toronto)

Current attempt count: {attempt_count}
Previous attempts: {previous_attempts}

Determine whether to try a different symbol format, consider another exchange, or stop if \
likely formats are exhausted.";

pub const FINANCIAL_ANALYSIS_PROMPT: &str = "Analyze the financial data for {stock}:

# DATA
{formatted_data}

Perform a comprehensive quantitative analysis (~1200 words) covering:
1. Profitability (margins, ROE, ROA, ROIC, earnings quality)
2. Liquidity and solvency (working capital, coverage, capital structure)
3. Growth and efficiency (revenue, earnings, cash flow, asset turnover)
4. Valuation metrics (P/E, P/B, EV/EBITDA, historical trends)
5. Cash flow analysis (operating trends, free cash flow, quality)
6. Risk assessment (leverage, volatility, credit metrics)
7. Capital allocation (dividends, buybacks, CAPEX, R&D)

Provide quantitative evidence and specific metrics for each point, and flag significant \
deviations or concerning trends.";

// --- Orchestrator ---

pub const ORCHESTRATOR_PLAN_PROMPT: &str = "You are an expert investment research planner.
For the stock {stock}, create two focused research queries, one sentence each, for:
1. An economic analysis (must include \"economic analysis\" in the query)
2. An industry analysis (must include \"industry analysis\" in the query)

Consider both company-specific and broader market factors.";

pub const COMBINE_ANALYSES_PROMPT: &str = "As a senior investment analyst, combine these \
separate analyses into a cohesive investment thesis.

Economic Analysis:
{economic_analysis}

Industry Analysis:
{industry_analysis}

Quantitative Analysis:
{quantitative_analysis}

Stock: {stock}

Create a comprehensive investment analysis (~2000 words) covering the executive summary, \
company analysis, financial analysis, valuation, market environment, risk assessment, and the \
investment case, ending with a Sources section listing source names and links. Use ## for \
section titles (Markdown). Integrate the economic, industry, and financial perspectives, \
address both bull and bear scenarios, and support conclusions with specific metrics. Do not \
give specific buy, sell, or hold advice. Start with \"Investment Thesis for {stock}\" or \
similar, in a professional and objective tone.";

#[cfg(test)]
mod tests {
    use super::*;
    use thesis_research::fill;

    #[test]
    fn test_loop_templates_carry_expected_placeholders() {
        for template in [ECONOMIC_ANALYSIS_PROMPT, INDUSTRY_ANALYSIS_PROMPT] {
            assert!(template.contains("{query}"));
            assert!(template.contains("{formatted_results}"));
        }
        for template in [ECONOMIC_SUMMARY_PROMPT, INDUSTRY_SUMMARY_PROMPT] {
            assert!(template.contains("{current_summary}"));
            assert!(template.contains("{formatted_results}"));
        }
        assert!(REFLECTION_PROMPT.contains("{current_summary}"));
    }

    #[test]
    fn test_combine_template_fills_cleanly() {
        let text = fill(ECONOMIC_COMBINE_PROMPT, &[
            ("summaries", "s"),
            ("combined_analysis", "{}"),
            ("topic", "ACME"),
        ]);
        assert!(!text.contains("{summaries}"));
        assert!(text.contains("ACME"));
    }
}
