//! Tool trait — the abstraction over callable capabilities.
//!
//! Tools are what ground the model's answers: course content search,
//! course outline retrieval. Each execution returns its text result and
//! its citation sources together, so there is no per-round reset/read
//! handshake for sources.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ToolError;
use crate::generation::ToolDefinition;

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Correlation token linking this invocation to its result; opaque,
    /// unique within its round
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Input as a JSON value
    pub input: serde_json::Value,
}

impl ToolInvocation {
    /// Whether this invocation repeats `other`: same tool name and
    /// structurally equal input. Correlation ids are excluded — they are
    /// unique per round by construction.
    pub fn repeats(&self, other: &ToolInvocation) -> bool {
        self.name == other.name && self.input == other.input
    }
}

/// An opaque citation unit emitted by a tool.
///
/// The orchestrator appends and returns these; it never inspects their
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRecord(pub serde_json::Value);

impl From<serde_json::Value> for SourceRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The result of one tool execution: text content plus whatever citation
/// sources the tool wants surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The text handed back to the model
    pub content: String,

    /// Citation sources, passed through untouched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRecord>,
}

impl ToolOutput {
    /// A plain text output with no sources.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sources: Vec::new(),
        }
    }
}

/// The core Tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "search_course_content").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's input.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given input.
    async fn execute(
        &self,
        input: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the backend.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// A registry of available tools: a typed name→tool mapping resolved once
/// at registration.
///
/// The round loop uses this to:
/// 1. Get tool definitions to send to the backend
/// 2. Look up and execute tools when the backend requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool definitions (for sending to the backend).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Execute an invocation, failing fast with `NotFound` for unknown
    /// tool names.
    pub async fn execute(
        &self,
        invocation: &ToolInvocation,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(&invocation.name)
            .ok_or_else(|| ToolError::NotFound(invocation.name.clone()))?;
        tool.execute(invocation.input.clone()).await
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
