//! The structured model caller
//!
//! [`ModelCaller`] is the single entry point the research loops use to talk
//! to a language model. It wraps an injected [`ModelProvider`] and exposes
//! two modes: free text and schema-constrained. Schema defaulting is a
//! contract of this component, so callers always receive fully-populated
//! values, never nulls.

use crate::observe::{CallKind, CallTrace, TraceSink};
use crate::{
    CompletionRequest, Message, ModelError, ModelProvider, Result, StructuredOutput,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for the model caller
#[derive(Debug, Clone)]
pub struct CallerConfig {
    /// Model identifier passed to the provider
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Facade over a model provider with text and structured modes
pub struct ModelCaller {
    provider: Arc<dyn ModelProvider>,
    config: CallerConfig,
    sink: Option<Arc<dyn TraceSink>>,
}

impl ModelCaller {
    /// Create a new caller around an injected provider
    pub fn new(provider: Arc<dyn ModelProvider>, config: CallerConfig) -> Self {
        Self {
            provider,
            config,
            sink: None,
        }
    }

    /// Attach an observability sink; recording is fire-and-forget
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Get the configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generate free text from a prompt
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(prompt)])
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let result = self.provider.complete(request).await;
        self.trace(CallKind::Text, prompt, &result);
        Ok(result?.text)
    }

    /// Generate a value conforming to `T`'s declared schema
    ///
    /// The model's JSON output has the schema's defaults applied for any
    /// omitted or null field, then is type-checked. A non-conforming reply
    /// is retried exactly once with a corrective instruction; a second
    /// violation fails the unit with [`ModelError::SchemaViolation`].
    pub async fn generate_structured<T: StructuredOutput>(&self, prompt: &str) -> Result<T> {
        let schema = T::schema();

        match self.structured_attempt::<T>(prompt, &schema).await {
            Ok(value) => Ok(value),
            Err(ModelError::SchemaViolation(reason)) => {
                warn!("Structured output rejected, retrying once: {reason}");
                let corrective = format!(
                    "{prompt}\n\nYour previous reply did not conform to the required \
                     schema ({reason}). Reply with a single JSON object matching the \
                     schema exactly, with no surrounding text."
                );
                self.structured_attempt::<T>(&corrective, &schema).await
            }
            Err(other) => Err(other),
        }
    }

    async fn structured_attempt<T: StructuredOutput>(
        &self,
        prompt: &str,
        schema: &crate::Schema,
    ) -> Result<T> {
        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(prompt)])
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .response_schema(schema.clone())
            .build();

        let result = self.provider.complete(request).await;
        self.trace(CallKind::Structured, prompt, &result);
        let response = result?;

        let raw = strip_code_fence(&response.text);
        let mut value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| ModelError::SchemaViolation(format!("invalid JSON: {e}")))?;

        schema.apply_defaults(&mut value);
        schema
            .validate(&value)
            .map_err(ModelError::SchemaViolation)?;

        debug!("Structured output validated against schema");
        serde_json::from_value(value)
            .map_err(|e| ModelError::SchemaViolation(format!("deserialization failed: {e}")))
    }

    fn trace(&self, kind: CallKind, prompt: &str, result: &Result<crate::CompletionResponse>) {
        if let Some(sink) = &self.sink {
            sink.record(CallTrace {
                provider: self.provider.name().to_string(),
                model: self.config.model.clone(),
                kind,
                prompt_chars: prompt.len(),
                response_chars: result.as_ref().map_or(0, |r| r.text.len()),
                ok: result.is_ok(),
            });
        }
    }
}

/// Strip a Markdown code fence wrapper from model output, if present
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::ChannelSink;
    use crate::{CompletionResponse, Schema, TokenUsage};
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::Mutex;

    #[derive(Debug, Deserialize)]
    struct Verdict {
        sufficient: bool,
        refined_query: String,
    }

    impl StructuredOutput for Verdict {
        fn schema() -> Schema {
            Schema::object(
                "Reflection verdict",
                vec![
                    ("sufficient", Schema::boolean_with_default("Enough?", false)),
                    ("refined_query", Schema::string_with_default("Refined", "")),
                ],
            )
        }
    }

    /// Provider that replays canned responses in order
    struct ScriptedProvider {
        responses: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().map(String::from).collect()),
            }
        }
    }

    #[async_trait]
    impl ModelProvider for ScriptedProvider {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
            let text = self
                .responses
                .lock()
                .expect("lock")
                .pop()
                .unwrap_or_else(|| "out of script".to_string());
            Ok(CompletionResponse {
                text,
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn caller(provider: ScriptedProvider) -> ModelCaller {
        ModelCaller::new(Arc::new(provider), CallerConfig::default())
    }

    #[tokio::test]
    async fn test_generate_text() {
        let caller = caller(ScriptedProvider::new(vec!["hello"]));
        let text = caller.generate_text("hi").await.expect("text");
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_structured_applies_defaults() {
        let caller = caller(ScriptedProvider::new(vec![r#"{"sufficient": true}"#]));
        let verdict: Verdict = caller.generate_structured("judge").await.expect("verdict");
        assert!(verdict.sufficient);
        assert_eq!(verdict.refined_query, "");
    }

    #[tokio::test]
    async fn test_structured_strips_code_fence() {
        let caller = caller(ScriptedProvider::new(vec![
            "```json\n{\"sufficient\": false, \"refined_query\": \"more\"}\n```",
        ]));
        let verdict: Verdict = caller.generate_structured("judge").await.expect("verdict");
        assert_eq!(verdict.refined_query, "more");
    }

    #[tokio::test]
    async fn test_structured_retries_once_then_succeeds() {
        let caller = caller(ScriptedProvider::new(vec![
            "not json at all",
            r#"{"sufficient": true, "refined_query": ""}"#,
        ]));
        let verdict: Verdict = caller.generate_structured("judge").await.expect("verdict");
        assert!(verdict.sufficient);
    }

    #[tokio::test]
    async fn test_structured_fails_after_second_violation() {
        let caller = caller(ScriptedProvider::new(vec!["garbage", "still garbage"]));
        let err = caller
            .generate_structured::<Verdict>("judge")
            .await
            .expect_err("violation");
        assert!(matches!(err, ModelError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_calls_are_traced() {
        let (sink, mut rx) = ChannelSink::new();
        let caller = ModelCaller::new(
            Arc::new(ScriptedProvider::new(vec!["ok"])),
            CallerConfig::default(),
        )
        .with_trace_sink(Arc::new(sink));

        caller.generate_text("hi").await.expect("text");
        let trace = rx.recv().await.expect("trace");
        assert_eq!(trace.kind, CallKind::Text);
        assert_eq!(trace.provider, "scripted");
        assert!(trace.ok);
    }

    #[test]
    fn test_strip_code_fence_plain() {
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }
}
