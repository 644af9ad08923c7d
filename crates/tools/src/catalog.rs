//! Static in-memory course catalog.
//!
//! A `CourseStore` backed by a `Vec` of course documents with naive
//! keyword-overlap scoring. Stands in for a real similarity-search store
//! in tests and demos; the production store lives behind the same trait.

use async_trait::async_trait;
use lectern_core::error::StoreError;
use lectern_core::store::{CourseOutline, CourseStore, Lesson, SearchHit, SearchRequest};
use tokio::sync::RwLock;

/// One course: outline metadata plus per-lesson content chunks.
#[derive(Debug, Clone)]
pub struct CourseDocument {
    pub title: String,
    pub link: Option<String>,
    pub lessons: Vec<Lesson>,
    /// (lesson_number, chunk text) pairs
    pub chunks: Vec<(u32, String)>,
}

pub struct StaticCatalog {
    courses: RwLock<Vec<CourseDocument>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            courses: RwLock::new(Vec::new()),
        }
    }

    /// Add a course to the catalog.
    pub async fn add_course(&self, course: CourseDocument) {
        self.courses.write().await.push(course);
    }

    /// A small fixed catalog for tests and demos.
    pub fn sample() -> Self {
        let courses = vec![
            CourseDocument {
                title: "Building RAG Systems".into(),
                link: Some("https://example.com/rag".into()),
                lessons: vec![
                    Lesson {
                        number: 1,
                        title: "Retrieval Foundations".into(),
                        link: Some("https://example.com/rag/1".into()),
                    },
                    Lesson {
                        number: 2,
                        title: "Sequential Tool Calling".into(),
                        link: Some("https://example.com/rag/2".into()),
                    },
                ],
                chunks: vec![
                    (
                        1,
                        "Retrieval-augmented generation grounds model answers in \
                         documents fetched from a knowledge store."
                            .into(),
                    ),
                    (
                        2,
                        "Sequential tool calling lets the model issue a tool request, \
                         observe the result, and decide on a follow-up call."
                            .into(),
                    ),
                ],
            },
            CourseDocument {
                title: "Vector Search in Practice".into(),
                link: Some("https://example.com/vectors".into()),
                lessons: vec![Lesson {
                    number: 1,
                    title: "Embeddings".into(),
                    link: None,
                }],
                chunks: vec![(
                    1,
                    "Embeddings map text into a vector space where semantic \
                     similarity becomes geometric distance."
                        .into(),
                )],
            },
        ];
        Self {
            courses: RwLock::new(courses),
        }
    }

    /// Keyword-overlap score: how many query terms appear in the chunk.
    fn score(query: &str, chunk: &str) -> usize {
        let chunk_lower = chunk.to_lowercase();
        query
            .to_lowercase()
            .split_whitespace()
            .filter(|term| chunk_lower.contains(*term))
            .count()
    }

    fn title_matches(filter: &str, title: &str) -> bool {
        title.to_lowercase().contains(&filter.to_lowercase())
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseStore for StaticCatalog {
    async fn search(
        &self,
        request: SearchRequest,
    ) -> std::result::Result<Vec<SearchHit>, StoreError> {
        let courses = self.courses.read().await;

        let mut scored: Vec<(usize, SearchHit)> = Vec::new();
        for course in courses.iter() {
            if let Some(filter) = &request.course_title {
                if !Self::title_matches(filter, &course.title) {
                    continue;
                }
            }
            for (lesson_number, chunk) in &course.chunks {
                if let Some(wanted) = request.lesson_number {
                    if *lesson_number != wanted {
                        continue;
                    }
                }
                let score = Self::score(&request.query, chunk);
                if score == 0 {
                    continue;
                }
                let lesson_link = course
                    .lessons
                    .iter()
                    .find(|l| l.number == *lesson_number)
                    .and_then(|l| l.link.clone());
                scored.push((
                    score,
                    SearchHit {
                        course_title: course.title.clone(),
                        lesson_number: Some(*lesson_number),
                        content: chunk.clone(),
                        lesson_link,
                    },
                ));
            }
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(request.limit);

        Ok(scored.into_iter().map(|(_, hit)| hit).collect())
    }

    async fn outline(
        &self,
        course_title: &str,
    ) -> std::result::Result<Option<CourseOutline>, StoreError> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .find(|c| Self::title_matches(course_title, &c.title))
            .map(|c| CourseOutline {
                title: c.title.clone(),
                link: c.link.clone(),
                lessons: c.lessons.clone(),
            }))
    }

    async fn course_count(&self) -> std::result::Result<usize, StoreError> {
        Ok(self.courses.read().await.len())
    }

    async fn course_titles(&self) -> std::result::Result<Vec<String>, StoreError> {
        Ok(self
            .courses
            .read()
            .await
            .iter()
            .map(|c| c.title.clone())
            .collect())
    }
}
