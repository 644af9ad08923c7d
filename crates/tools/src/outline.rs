//! Course outline tool.
//!
//! Returns a course's full structure: title, link, and every lesson with
//! its number and title. Used for questions about what a course covers
//! rather than what a lesson says.

use std::sync::Arc;

use async_trait::async_trait;
use lectern_core::error::ToolError;
use lectern_core::store::{CourseOutline, CourseStore};
use lectern_core::tool::{Tool, ToolOutput};

pub struct CourseOutlineTool {
    store: Arc<dyn CourseStore>,
}

impl CourseOutlineTool {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    fn format_outline(outline: &CourseOutline) -> String {
        let mut text = format!("Course: {}", outline.title);
        if let Some(link) = &outline.link {
            text.push_str(&format!("\nLink: {link}"));
        }
        text.push_str("\nLessons:");
        for lesson in &outline.lessons {
            text.push_str(&format!("\n{}. {}", lesson.number, lesson.title));
        }
        text
    }
}

#[async_trait]
impl Tool for CourseOutlineTool {
    fn name(&self) -> &str {
        "get_course_outline"
    }

    fn description(&self) -> &str {
        "Get a course's complete outline: title, course link, and all lessons \
         with their numbers and titles."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "course_title": {
                    "type": "string",
                    "description": "Title of the course to look up (partial match)"
                }
            },
            "required": ["course_title"]
        })
    }

    async fn execute(
        &self,
        input: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let course_title = input["course_title"].as_str().ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'course_title' argument".into())
        })?;

        let outline = self
            .store
            .outline(course_title)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "get_course_outline".into(),
                reason: e.to_string(),
            })?;

        let Some(outline) = outline else {
            return Ok(ToolOutput::text(format!(
                "No course found matching '{course_title}'."
            )));
        };

        Ok(ToolOutput {
            content: Self::format_outline(&outline),
            sources: vec![
                serde_json::json!({
                    "text": outline.title,
                    "link": outline.link,
                })
                .into(),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn tool() -> CourseOutlineTool {
        CourseOutlineTool::new(Arc::new(StaticCatalog::sample()))
    }

    #[tokio::test]
    async fn outline_lists_all_lessons() {
        let output = tool()
            .execute(serde_json::json!({"course_title": "Building RAG Systems"}))
            .await
            .unwrap();

        assert!(output.content.starts_with("Course: Building RAG Systems"));
        assert!(output.content.contains("1. "));
        assert_eq!(output.sources.len(), 1);
        assert_eq!(output.sources[0].0["text"], "Building RAG Systems");
    }

    #[tokio::test]
    async fn partial_title_matches() {
        let output = tool()
            .execute(serde_json::json!({"course_title": "rag"}))
            .await
            .unwrap();
        assert!(output.content.contains("Building RAG Systems"));
    }

    #[tokio::test]
    async fn unknown_course_states_it_clearly() {
        let output = tool()
            .execute(serde_json::json!({"course_title": "Quantum Basket Weaving"}))
            .await
            .unwrap();
        assert_eq!(
            output.content,
            "No course found matching 'Quantum Basket Weaving'."
        );
        assert!(output.sources.is_empty());
    }

    #[tokio::test]
    async fn missing_title_is_invalid_arguments() {
        let err = tool().execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
