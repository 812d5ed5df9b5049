//! Model provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for model providers
///
/// Implementations of this trait provide access to different generative
/// text services (e.g., Gemini). The rest of the system only depends on
/// this capability, so tests can substitute fakes per call path.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate a completion from the model
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with messages, parameters, and
    ///   an optional output schema
    ///
    /// # Returns
    ///
    /// The completion response with the generated text and usage metadata
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
