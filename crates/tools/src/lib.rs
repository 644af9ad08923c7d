//! Course-materials tools for Lectern.
//!
//! Two tools ground the model's answers:
//! - `search_course_content` — content search over lesson chunks
//! - `get_course_outline` — full course structure with lesson list
//!
//! Both run against a `CourseStore`; `StaticCatalog` is a keyword-scoring
//! in-memory store for tests and demos.

pub mod catalog;
pub mod outline;
pub mod search;

use std::sync::Arc;

use lectern_core::store::CourseStore;
use lectern_core::tool::ToolRegistry;

pub use catalog::{CourseDocument, StaticCatalog};
pub use outline::CourseOutlineTool;
pub use search::CourseSearchTool;

/// Create a tool registry with both course tools over the given store.
pub fn registry(store: Arc<dyn CourseStore>, max_results: usize) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CourseSearchTool::new(store.clone(), max_results)));
    registry.register(Box::new(CourseOutlineTool::new(store)));
    registry
}
