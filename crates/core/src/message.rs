//! Message domain types.
//!
//! A query's transcript is an ordered list of `Message`s alternating
//! between the user and the assistant. Message content is either plain
//! text or a list of typed content blocks — the blocks serialize to the
//! Anthropic Messages API wire shape, so a transcript can carry the raw
//! tool-use blocks exactly as the backend issued them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tool::ToolInvocation;

/// The role of a message sender in a transcript.
///
/// The system prompt is a top-level request field, never a transcript
/// message, so there is no system role here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (also carries batched tool results back to the model)
    User,
    /// The model
    Assistant,
}

/// A single typed content block, in Messages API wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text emitted by the model.
    Text { text: String },

    /// A tool invocation requested by the model. `id` is the correlation
    /// token linking this request to its result.
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },

    /// The result of one tool invocation, correlated by `tool_use_id`.
    ToolResult { tool_use_id: String, content: String },
}

impl ContentBlock {
    /// View this block as a tool invocation, if it is one.
    pub fn as_invocation(&self) -> Option<ToolInvocation> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some(ToolInvocation {
                id: id.clone(),
                name: name.clone(),
                input: input.clone(),
            }),
            _ => None,
        }
    }
}

/// Message content: a plain string or an ordered block list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// A single message in a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID (local bookkeeping, not sent on the wire)
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The content
    pub content: MessageContent,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new plain-text user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: MessageContent::Text(content.into()),
            timestamp: Utc::now(),
        }
    }

    /// Create a new plain-text assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: MessageContent::Text(content.into()),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message carrying raw content blocks
    /// (text and tool-use blocks as issued by the backend).
    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: MessageContent::Blocks(blocks),
            timestamp: Utc::now(),
        }
    }

    /// Create a user message bundling content blocks — used to send all of
    /// one round's tool results back in a single turn.
    pub fn user_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: MessageContent::Blocks(blocks),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("What does lesson 3 cover?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(
            msg.content,
            MessageContent::Text("What does lesson 3 cover?".into())
        );
    }

    #[test]
    fn content_block_wire_shape() {
        let block = ContentBlock::ToolUse {
            id: "toolu_01".into(),
            name: "search_course_content".into(),
            input: serde_json::json!({"query": "embeddings"}),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_use");
        assert_eq!(json["id"], "toolu_01");
        assert_eq!(json["input"]["query"], "embeddings");
    }

    #[test]
    fn tool_result_wire_shape() {
        let block = ContentBlock::ToolResult {
            tool_use_id: "toolu_01".into(),
            content: "lesson content here".into(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_result");
        assert_eq!(json["tool_use_id"], "toolu_01");
    }

    #[test]
    fn block_as_invocation() {
        let block = ContentBlock::ToolUse {
            id: "toolu_02".into(),
            name: "get_course_outline".into(),
            input: serde_json::json!({"course_title": "MCP"}),
        };
        let inv = block.as_invocation().unwrap();
        assert_eq!(inv.name, "get_course_outline");
        assert_eq!(inv.id, "toolu_02");

        let text = ContentBlock::Text { text: "hi".into() };
        assert!(text.as_invocation().is_none());
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user_blocks(vec![ContentBlock::ToolResult {
            tool_use_id: "toolu_03".into(),
            content: "result".into(),
        }]);
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, Role::User);
        assert_eq!(back.content, msg.content);
    }
}
