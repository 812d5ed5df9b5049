//! Deduplicated evidence bundles
//!
//! A bundle holds the sources returned for one search query, deduplicated
//! by URL. Formatting for a model prompt truncates raw content to a
//! caller-specified token budget (approximately 4 characters per token)
//! with a marker appended when truncated; the transform is deterministic
//! given the same input and budget.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rough estimate of characters per token when sizing raw content
const CHARS_PER_TOKEN: usize = 4;

/// One search result source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Source title
    #[serde(default)]
    pub title: String,

    /// Source URL (the deduplication key)
    #[serde(default)]
    pub url: String,

    /// Most relevant short content
    #[serde(default)]
    pub content: String,

    /// Full raw content, when the provider returned it
    #[serde(default)]
    pub raw_content: Option<String>,
}

/// A deduplicated, ordered collection of sources
#[derive(Debug, Clone, Default)]
pub struct EvidenceBundle {
    sources: Vec<Source>,
}

impl EvidenceBundle {
    /// Build a bundle, keeping the first-encountered source per URL
    pub fn from_sources(sources: impl IntoIterator<Item = Source>) -> Self {
        let mut seen = HashSet::new();
        let mut deduped = Vec::new();
        for source in sources {
            if seen.insert(source.url.clone()) {
                deduped.push(source);
            }
        }
        Self { sources: deduped }
    }

    /// Whether the bundle holds no sources
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of distinct sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// The deduplicated sources, in first-seen order
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Format the bundle for a model prompt
    ///
    /// Raw content is limited to `max_tokens_per_source` tokens using the
    /// 4-characters-per-token heuristic, with `"... [truncated]"` appended
    /// when cut.
    pub fn formatted(&self, max_tokens_per_source: usize, include_raw_content: bool) -> String {
        let char_limit = max_tokens_per_source * CHARS_PER_TOKEN;
        let mut text = String::from("Sources:\n\n");

        for source in &self.sources {
            text.push_str(&format!("Source {}:\n===\n", source.title));
            text.push_str(&format!("URL: {}\n===\n", source.url));
            text.push_str(&format!(
                "Most relevant content from source: {}\n===\n",
                source.content
            ));
            if include_raw_content {
                let raw = source.raw_content.as_deref().unwrap_or("");
                let limited = if raw.len() > char_limit {
                    let mut cut = raw
                        .char_indices()
                        .take_while(|(i, _)| *i < char_limit)
                        .map(|(_, c)| c)
                        .collect::<String>();
                    cut.push_str("... [truncated]");
                    cut
                } else {
                    raw.to_string()
                };
                text.push_str(&format!(
                    "Full source content limited to {max_tokens_per_source} tokens: {limited}\n\n"
                ));
            }
        }

        text.trim().to_string()
    }

    /// Render sources as a bulleted list for the source log
    pub fn bullet_list(&self) -> String {
        self.sources
            .iter()
            .map(|source| format!("* {}: {}", source.title, source.url))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(title: &str, url: &str, content: &str) -> Source {
        Source {
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
            raw_content: None,
        }
    }

    #[test]
    fn test_dedup_keeps_first_encountered() {
        let bundle = EvidenceBundle::from_sources(vec![
            source("First", "https://example.com/a", "first content"),
            source("Other", "https://example.com/b", "other"),
            source("Duplicate", "https://example.com/a", "second content"),
        ]);

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.sources()[0].content, "first content");
        assert_eq!(bundle.sources()[1].url, "https://example.com/b");
    }

    #[test]
    fn test_formatted_truncates_with_marker() {
        let mut src = source("Long", "https://example.com", "short");
        src.raw_content = Some("x".repeat(100));
        let bundle = EvidenceBundle::from_sources(vec![src]);

        // 10 tokens * 4 chars = 40 char limit
        let formatted = bundle.formatted(10, true);
        assert!(formatted.contains("... [truncated]"));
        assert!(formatted.contains(&"x".repeat(40)));
        assert!(!formatted.contains(&"x".repeat(41)));
    }

    #[test]
    fn test_formatted_is_deterministic() {
        let mut src = source("A", "https://example.com", "c");
        src.raw_content = Some("y".repeat(500));
        let bundle = EvidenceBundle::from_sources(vec![src]);
        assert_eq!(bundle.formatted(20, true), bundle.formatted(20, true));
    }

    #[test]
    fn test_formatted_handles_missing_raw_content() {
        let bundle =
            EvidenceBundle::from_sources(vec![source("A", "https://example.com", "short")]);
        let formatted = bundle.formatted(10, true);
        assert!(!formatted.contains("[truncated]"));
    }

    #[test]
    fn test_bullet_list() {
        let bundle = EvidenceBundle::from_sources(vec![
            source("A", "https://a.example", ""),
            source("B", "https://b.example", ""),
        ]);
        assert_eq!(
            bundle.bullet_list(),
            "* A: https://a.example\n* B: https://b.example"
        );
    }
}
