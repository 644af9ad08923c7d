//! Anthropic Messages API generation backend.
//!
//! Features:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as top-level field
//! - Native tool use with `tool_use` / `tool_result` content blocks,
//!   `tool_choice = auto` whenever tools are offered
//! - Temperature fixed at zero so round behavior is deterministic

use async_trait::async_trait;
use lectern_core::error::GenerationError;
use lectern_core::generation::{
    GenerationBackend, GenerationOutcome, GenerationRequest, StopReason, ToolDefinition,
};
use lectern_core::message::{ContentBlock, Message, MessageContent, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MAX_TOKENS: u32 = 800;

/// Anthropic native Messages API backend.
pub struct AnthropicGeneration {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl AnthropicGeneration {
    /// Create a new Anthropic backend.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the output-token cap per call.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// Switch the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature. Defaults to zero so round behavior
    /// stays deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Convert transcript messages to Anthropic API format.
    ///
    /// Core content blocks already serialize to the wire shape, so block
    /// content passes through as-is; plain text passes as a string.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage<'_>> {
        messages
            .iter()
            .map(|msg| ApiMessage {
                role: match msg.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: &msg.content,
            })
            .collect()
    }

    /// Convert tool definitions to Anthropic format.
    fn to_api_tools(tools: &[ToolDefinition]) -> Vec<ApiTool<'_>> {
        tools
            .iter()
            .map(|t| ApiTool {
                name: &t.name,
                description: &t.description,
                input_schema: &t.input_schema,
            })
            .collect()
    }

    fn parse_stop_reason(raw: Option<&str>) -> StopReason {
        match raw {
            Some("tool_use") => StopReason::ToolUse,
            Some("end_turn") | None => StopReason::EndTurn,
            Some(other) => {
                // max_tokens and friends: the answer may be truncated, but
                // it is still a final answer from this layer's view.
                warn!(stop_reason = other, "Unexpected stop reason, treating as end of turn");
                StopReason::EndTurn
            }
        }
    }
}

#[async_trait]
impl GenerationBackend for AnthropicGeneration {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationOutcome, GenerationError> {
        let url = format!("{}/v1/messages", self.base_url);
        let api_messages = Self::to_api_messages(&request.messages);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": api_messages,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "system": request.system,
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
            body["tool_choice"] = serde_json::json!({"type": "auto"});
        }

        debug!(
            backend = "anthropic",
            model = %self.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(GenerationError::RateLimited { retry_after_secs: 5 });
        }
        if status == 401 || status == 403 {
            return Err(GenerationError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(GenerationError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: ApiResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse Anthropic response: {e}"))
        })?;

        Ok(GenerationOutcome {
            stop_reason: Self::parse_stop_reason(api_resp.stop_reason.as_deref()),
            content: api_resp.content,
        })
    }
}

// --- Anthropic API types ---

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a MessageContent,
}

#[derive(Debug, Serialize)]
struct ApiTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    // Core ContentBlock matches the wire tags, so responses deserialize
    // straight into domain blocks.
    content: Vec<ContentBlock>,

    #[serde(default)]
    stop_reason: Option<String>,
}
