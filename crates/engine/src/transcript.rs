//! Append-only per-query transcript.
//!
//! A transcript starts with the wrapped user query and grows by exactly
//! two messages per completed tool round: the assistant's raw content
//! blocks, then a single user message batching that round's tool results.
//! After `k` completed rounds it therefore holds `1 + 2k` messages.
//! Nothing is ever rewritten or removed.

use lectern_core::{ContentBlock, Message};

pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Start a transcript for one query. The query text is the first and,
    /// until a round completes, only message.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(query)],
        }
    }

    /// Record one completed tool round: the assistant's blocks exactly as
    /// issued, then all of the round's tool results in one user turn.
    pub fn push_round(
        &mut self,
        assistant_blocks: Vec<ContentBlock>,
        result_blocks: Vec<ContentBlock>,
    ) {
        self.messages.push(Message::assistant_blocks(assistant_blocks));
        self.messages.push(Message::user_blocks(result_blocks));
    }

    /// The messages to send on the next generation call.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
