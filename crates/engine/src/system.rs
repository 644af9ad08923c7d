//! The query-level engine: prompt wrapping, session history, and the
//! analytics surface over the course catalog.
//!
//! `RagEngine` is the composition root's handle. It fetches a session's
//! prior conversation once before a query's rounds begin, runs the round
//! loop, and records the exchange once after the rounds end. Session
//! bookkeeping never happens mid-round, and a failed query records
//! nothing.

use std::sync::Arc;

use lectern_core::{
    CourseStore, Error, GenerationBackend, SessionId, SessionStore, SourceRecord, ToolRegistry,
};
use tracing::debug;

use crate::rounds::RoundLoop;

/// Instructions sent as the system content on every generation call.
const SYSTEM_PROMPT: &str = "\
You are a course materials assistant. You answer questions about courses, \
their lessons, and their content using the tools available to you.

Tool usage:
- Use search_course_content for questions about specific course content or \
detailed educational materials.
- Use get_course_outline for questions about a course's structure, its \
lesson list, or its links.
- You may call tools across at most two rounds to gather what you need, \
for example an outline lookup followed by a content search.
- If a tool returns nothing useful, say so rather than guessing.

Answers must be concise and grounded in the retrieved material. Do not \
mention the tools or the search process in your answer.";

/// One answered query: the final text plus the citation sources emitted by
/// the tool executions that informed it.
#[derive(Debug, Clone)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<SourceRecord>,
}

/// Catalog statistics for the analytics surface.
#[derive(Debug, Clone)]
pub struct CatalogAnalytics {
    pub total_courses: usize,
    pub course_titles: Vec<String>,
}

/// The top-level query engine.
pub struct RagEngine {
    rounds: RoundLoop,
    store: Arc<dyn CourseStore>,
    sessions: Arc<dyn SessionStore>,
}

impl RagEngine {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        tools: Arc<ToolRegistry>,
        store: Arc<dyn CourseStore>,
        sessions: Arc<dyn SessionStore>,
        max_rounds: usize,
    ) -> Self {
        Self {
            rounds: RoundLoop::new(backend, tools, SYSTEM_PROMPT, max_rounds),
            store,
            sessions,
        }
    }

    /// Answer one user query, optionally within a session.
    pub async fn query(
        &self,
        text: &str,
        session_id: Option<&SessionId>,
    ) -> Result<QueryAnswer, Error> {
        let prompt = format!("Answer this question about course materials: {text}");

        let history = match session_id {
            Some(id) => self
                .sessions
                .conversation_history(id)
                .await
                .map_err(Error::from)?,
            None => None,
        };
        debug!(has_history = history.is_some(), "running query");

        let outcome = self.rounds.execute(&prompt, history.as_deref()).await?;

        if let Some(id) = session_id {
            self.sessions
                .add_exchange(id, text, &outcome.answer)
                .await
                .map_err(Error::from)?;
        }

        Ok(QueryAnswer {
            answer: outcome.answer,
            sources: outcome.sources,
        })
    }

    /// Start a new conversation session.
    pub async fn create_session(&self) -> Result<SessionId, Error> {
        Ok(self.sessions.create().await?)
    }

    /// Catalog statistics: course count and titles.
    pub async fn analytics(&self) -> Result<CatalogAnalytics, Error> {
        Ok(CatalogAnalytics {
            total_courses: self.store.course_count().await?,
            course_titles: self.store.course_titles().await?,
        })
    }
}
