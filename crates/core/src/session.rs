//! Session store trait — the conversation-history collaborator.
//!
//! The round loop itself is history-agnostic; the engine fetches prior
//! conversation text once before a query's rounds begin and records the
//! exchange once after they end, never mid-loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The conversation-history collaborator.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session.
    async fn create(&self) -> std::result::Result<SessionId, SessionError>;

    /// Formatted prior-conversation text for a session, or None for an
    /// unknown or empty session.
    async fn conversation_history(
        &self,
        session_id: &SessionId,
    ) -> std::result::Result<Option<String>, SessionError>;

    /// Record one completed query/answer exchange.
    async fn add_exchange(
        &self,
        session_id: &SessionId,
        query: &str,
        answer: &str,
    ) -> std::result::Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_display() {
        let id = SessionId::from("abc-123");
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn session_id_from_conversions() {
        let id: SessionId = "abc".into();
        assert_eq!(id, SessionId::from(String::from("abc")));
    }
}
