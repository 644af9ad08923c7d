//! In-memory session store — bounded conversation history per session.
//!
//! Keeps the last `max_history` query/answer exchanges for each session
//! and renders them as `User:` / `Assistant:` lines for inclusion in the
//! system content of later queries. No persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use lectern_core::error::SessionError;
use lectern_core::session::{SessionId, SessionStore};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Exchange {
    query: String,
    answer: String,
}

pub struct InMemorySessions {
    max_history: usize,
    sessions: RwLock<HashMap<SessionId, Vec<Exchange>>>,
}

impl InMemorySessions {
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn render(exchanges: &[Exchange]) -> String {
        let lines: Vec<String> = exchanges
            .iter()
            .map(|e| format!("User: {}\nAssistant: {}", e.query, e.answer))
            .collect();
        lines.join("\n")
    }
}

#[async_trait]
impl SessionStore for InMemorySessions {
    async fn create(&self) -> std::result::Result<SessionId, SessionError> {
        let id = SessionId::new();
        self.sessions.write().await.insert(id.clone(), Vec::new());
        Ok(id)
    }

    async fn conversation_history(
        &self,
        session_id: &SessionId,
    ) -> std::result::Result<Option<String>, SessionError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .filter(|exchanges| !exchanges.is_empty())
            .map(|exchanges| Self::render(exchanges)))
    }

    async fn add_exchange(
        &self,
        session_id: &SessionId,
        query: &str,
        answer: &str,
    ) -> std::result::Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let exchanges = sessions.entry(session_id.clone()).or_default();
        exchanges.push(Exchange {
            query: query.to_string(),
            answer: answer.to_string(),
        });
        // Keep only the most recent exchanges
        if exchanges.len() > self.max_history {
            let excess = exchanges.len() - self.max_history;
            exchanges.drain(..excess);
        }
        Ok(())
    }
}
