//! Course content search tool.
//!
//! Searches lesson chunks for content relevant to a query, optionally
//! filtered by course title and lesson number. Each hit contributes one
//! citation source alongside the formatted text handed back to the model.

use std::sync::Arc;

use async_trait::async_trait;
use lectern_core::error::ToolError;
use lectern_core::store::{CourseStore, SearchHit, SearchRequest};
use lectern_core::tool::{SourceRecord, Tool, ToolOutput};

pub struct CourseSearchTool {
    store: Arc<dyn CourseStore>,
    max_results: usize,
}

impl CourseSearchTool {
    pub fn new(store: Arc<dyn CourseStore>, max_results: usize) -> Self {
        Self { store, max_results }
    }

    /// Header used both in the formatted result text and in the citation
    /// source for a hit.
    fn hit_label(hit: &SearchHit) -> String {
        match hit.lesson_number {
            Some(n) => format!("{} — Lesson {}", hit.course_title, n),
            None => hit.course_title.clone(),
        }
    }

    fn format_hits(hits: &[SearchHit]) -> String {
        let sections: Vec<String> = hits
            .iter()
            .map(|hit| format!("[{}]\n{}", Self::hit_label(hit), hit.content))
            .collect();
        sections.join("\n\n")
    }

    fn hit_sources(hits: &[SearchHit]) -> Vec<SourceRecord> {
        hits.iter()
            .map(|hit| {
                serde_json::json!({
                    "text": Self::hit_label(hit),
                    "link": hit.lesson_link,
                })
                .into()
            })
            .collect()
    }
}

#[async_trait]
impl Tool for CourseSearchTool {
    fn name(&self) -> &str {
        "search_course_content"
    }

    fn description(&self) -> &str {
        "Search course materials for specific content. Use for questions about \
         lesson content or detailed educational materials."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What to search for in the course content"
                },
                "course_title": {
                    "type": "string",
                    "description": "Course title to restrict the search to (partial match)"
                },
                "lesson_number": {
                    "type": "integer",
                    "description": "Specific lesson number to search within"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        input: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let query = input["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        let request = SearchRequest {
            query: query.to_string(),
            course_title: input["course_title"].as_str().map(String::from),
            lesson_number: input["lesson_number"].as_u64().map(|n| n as u32),
            limit: self.max_results,
        };

        let hits = self
            .store
            .search(request)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "search_course_content".into(),
                reason: e.to_string(),
            })?;

        if hits.is_empty() {
            return Ok(ToolOutput::text("No relevant content found."));
        }

        Ok(ToolOutput {
            content: Self::format_hits(&hits),
            sources: Self::hit_sources(&hits),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn tool() -> CourseSearchTool {
        CourseSearchTool::new(Arc::new(StaticCatalog::sample()), 5)
    }

    #[tokio::test]
    async fn search_returns_formatted_hits_and_sources() {
        let output = tool()
            .execute(serde_json::json!({"query": "tool calling"}))
            .await
            .unwrap();

        assert!(output.content.contains("Lesson"));
        assert!(!output.sources.is_empty());
        // Each source carries a text label
        assert!(output.sources[0].0["text"].is_string());
    }

    #[tokio::test]
    async fn search_respects_course_filter() {
        let output = tool()
            .execute(serde_json::json!({
                "query": "tool calling",
                "course_title": "Compilers"
            }))
            .await
            .unwrap();

        assert_eq!(output.content, "No relevant content found.");
        assert!(output.sources.is_empty());
    }

    #[tokio::test]
    async fn missing_query_is_invalid_arguments() {
        let err = tool().execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn definition_requires_query() {
        let def = tool().definition();
        assert_eq!(def.name, "search_course_content");
        assert_eq!(def.input_schema["required"][0], "query");
    }
}
