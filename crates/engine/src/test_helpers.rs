//! Scripted backend and stub tools shared by the engine's unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use lectern_core::{
    ContentBlock, GenerationBackend, GenerationError, GenerationOutcome, GenerationRequest,
    StopReason, Tool, ToolError, ToolOutput, ToolRegistry,
};

/// What a test cares about from one generation call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub message_count: usize,
    pub tools_offered: bool,
    pub system: String,
    pub first_message_text: Option<String>,
}

/// A backend that replays a fixed sequence of outcomes and records every
/// request it receives.
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<GenerationOutcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedBackend {
    pub fn new(outcomes: Vec<GenerationOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationOutcome, GenerationError> {
        let first_message_text = request.messages.first().and_then(|m| match &m.content {
            lectern_core::MessageContent::Text(text) => Some(text.clone()),
            lectern_core::MessageContent::Blocks(_) => None,
        });
        self.requests.lock().unwrap().push(RecordedRequest {
            message_count: request.messages.len(),
            tools_offered: !request.tools.is_empty(),
            system: request.system,
            first_message_text,
        });
        let outcome = self.outcomes.lock().unwrap().pop_front();
        outcome.ok_or_else(|| GenerationError::InvalidResponse("script exhausted".into()))
    }
}

/// A final text answer.
pub fn text_outcome(text: &str) -> GenerationOutcome {
    GenerationOutcome {
        stop_reason: StopReason::EndTurn,
        content: vec![ContentBlock::Text { text: text.into() }],
    }
}

/// A tool-use outcome carrying the given invocation blocks.
pub fn tool_outcome(blocks: Vec<ContentBlock>) -> GenerationOutcome {
    GenerationOutcome {
        stop_reason: StopReason::ToolUse,
        content: blocks,
    }
}

pub fn invocation_block(id: &str, name: &str, input: serde_json::Value) -> ContentBlock {
    ContentBlock::ToolUse {
        id: id.into(),
        name: name.into(),
        input,
    }
}

pub fn registry_with(tools: Vec<Box<dyn Tool>>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool);
    }
    registry
}

/// A tool that always returns the same content, with optional sources.
pub struct StubTool {
    name: String,
    content: String,
    sources: Vec<String>,
}

impl StubTool {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<&str>) -> Self {
        self.sources = sources.into_iter().map(String::from).collect();
        self
    }
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "stub tool"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(
        &self,
        _input: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        Ok(ToolOutput {
            content: self.content.clone(),
            sources: self
                .sources
                .iter()
                .map(|s| serde_json::json!({"text": s}).into())
                .collect(),
        })
    }
}

/// A tool whose every execution fails.
pub struct FailingTool {
    name: String,
}

impl FailingTool {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "always fails"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(
        &self,
        _input: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: self.name.clone(),
            reason: "stubbed failure".into(),
        })
    }
}
