//! Generation backend trait — the abstraction over the text-generation
//! capability.
//!
//! A `GenerationBackend` turns a transcript plus optional tool schemas
//! into either a final answer or a set of tool-invocation requests. Each
//! call returns an explicit `GenerationOutcome` value; there is no shared,
//! resettable per-call state on the backend, so one backend instance can
//! safely serve concurrent queries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::message::{ContentBlock, Message};
use crate::tool::ToolInvocation;

/// Why the backend stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model produced a final answer.
    EndTurn,
    /// The model is requesting tool invocations instead of answering.
    ToolUse,
}

/// A tool schema sent to the backend so the model knows what it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's input
    pub input_schema: serde_json::Value,
}

/// One generation call's input.
///
/// When `tools` is non-empty the backend must offer them to the model with
/// automatic tool choice; when empty, the outcome must never report
/// `StopReason::ToolUse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The transcript so far (user and assistant turns)
    pub messages: Vec<Message>,

    /// The instruction block, optionally already concatenated with
    /// prior-conversation text
    pub system: String,

    /// Tool schemas available this call; empty disables tool use
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

/// One generation call's result — the complete, per-call value that
/// replaces any cross-call signaling through backend fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Why generation stopped
    pub stop_reason: StopReason,

    /// Ordered content blocks exactly as the backend issued them
    pub content: Vec<ContentBlock>,
}

impl GenerationOutcome {
    /// All text blocks joined with newlines.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        parts.join("\n")
    }

    /// The tool invocations requested by this outcome, in block order.
    pub fn tool_invocations(&self) -> Vec<ToolInvocation> {
        self.content.iter().filter_map(|b| b.as_invocation()).collect()
    }
}

/// The generation capability consumed by the round loop.
///
/// Deterministic (temperature-zero) generation is assumed; the output-size
/// cap is the implementation's concern.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Run one generation call.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationOutcome, GenerationError>;
}
