//! Course store trait — the interface to the retrieval collaborator.
//!
//! The similarity-search implementation behind this trait is not part of
//! this engine; tools consume whatever store they are given. A simple
//! in-memory catalog lives in `lectern-tools` for tests and demos.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A content search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// What to search for
    pub query: String,

    /// Restrict to a course by (partial, case-insensitive) title match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,

    /// Restrict to a specific lesson number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_number: Option<u32>,

    /// Maximum hits to return
    pub limit: usize,
}

/// One matching chunk of course content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub course_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_number: Option<u32>,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_link: Option<String>,
}

/// One lesson within a course outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub number: u32,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A complete course outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOutline {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    pub lessons: Vec<Lesson>,
}

/// The retrieval collaborator consumed by the tools.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Search course content for chunks relevant to the request.
    async fn search(
        &self,
        request: SearchRequest,
    ) -> std::result::Result<Vec<SearchHit>, StoreError>;

    /// Look up a course outline by (partial) title, or None if no course
    /// matches.
    async fn outline(
        &self,
        course_title: &str,
    ) -> std::result::Result<Option<CourseOutline>, StoreError>;

    /// Number of courses in the catalog.
    async fn course_count(&self) -> std::result::Result<usize, StoreError>;

    /// Titles of all courses in the catalog.
    async fn course_titles(&self) -> std::result::Result<Vec<String>, StoreError>;
}
