//! Fire-and-forget call tracing
//!
//! Every model call is optionally reported to a [`TraceSink`]. Recording is
//! synchronous and non-blocking; a sink that cannot accept the event drops
//! it. Loss is tolerated.

/// Which caller entry point produced the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `generate_text`
    Text,
    /// `generate_structured`
    Structured,
}

/// One recorded model call
#[derive(Debug, Clone)]
pub struct CallTrace {
    /// Provider name
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Entry point used
    pub kind: CallKind,
    /// Prompt length in characters
    pub prompt_chars: usize,
    /// Response length in characters (0 on failure)
    pub response_chars: usize,
    /// Whether the call succeeded
    pub ok: bool,
}

/// Observability sink for model calls
pub trait TraceSink: Send + Sync {
    /// Record one call; must not block
    fn record(&self, trace: CallTrace);
}

/// Sink that forwards traces over an unbounded channel
///
/// Useful for tests and for decoupled exporters; if the receiver is gone
/// the event is silently dropped.
pub struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<CallTrace>,
}

impl ChannelSink {
    /// Create a sink and the receiving end
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<CallTrace>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TraceSink for ChannelSink {
    fn record(&self, trace: CallTrace) {
        let _ = self.tx.send(trace);
    }
}
