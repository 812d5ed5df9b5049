//! Structured model caller for thesis-rs
//!
//! This crate is the only component that talks to a language model. It
//! provides:
//!
//! - Message and completion types for model communication
//! - A value-level [`Schema`] describing the shape of structured output,
//!   including defaulting for fields the model omits
//! - The [`ModelProvider`] trait for concrete model backends
//! - The [`ModelCaller`] facade exposing text and schema-constrained modes
//! - Fire-and-forget call tracing via [`TraceSink`]
//! - Concrete provider implementations (behind feature flags)

pub mod caller;
pub mod completion;
pub mod error;
pub mod messages;
pub mod observe;
pub mod provider;
pub mod schema;

// Re-export main types
pub use caller::{CallerConfig, ModelCaller};
pub use completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use error::{ModelError, Result};
pub use messages::{Message, Role};
pub use observe::{CallKind, CallTrace, ChannelSink, TraceSink};
pub use provider::ModelProvider;
pub use schema::{Schema, StructuredOutput};

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
