//! Final report rendering

/// Render an analyst's final Markdown report
///
/// Used verbatim as the sub-agent's output; the combiner sees this text.
pub(crate) fn analysis_report(summary: &str, sources: &[String]) -> String {
    let summary = if summary.is_empty() {
        "No analysis available"
    } else {
        summary
    };
    format!(
        "## Analysis Report\n\n{summary}\n\n### Sources:\n{}",
        sources.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_layout() {
        let report = analysis_report("The outlook is mixed.", &[
            "* A: https://a".to_string(),
            "* B: https://b".to_string(),
        ]);
        assert_eq!(
            report,
            "## Analysis Report\n\nThe outlook is mixed.\n\n### Sources:\n* A: https://a\n* B: https://b"
        );
    }

    #[test]
    fn test_empty_summary_placeholder() {
        let report = analysis_report("", &[]);
        assert!(report.contains("No analysis available"));
    }
}
