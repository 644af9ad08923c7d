//! # Lectern Core
//!
//! Domain types, traits, and error definitions for the Lectern
//! course-materials RAG engine. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is defined as a trait here — the generation
//! backend, the tool surface, the course store, the session store.
//! Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod generation;
pub mod message;
pub mod session;
pub mod store;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, GenerationError, Result, SessionError, StoreError, ToolError};
pub use generation::{
    GenerationBackend, GenerationOutcome, GenerationRequest, StopReason, ToolDefinition,
};
pub use message::{ContentBlock, Message, MessageContent, Role};
pub use session::{SessionId, SessionStore};
pub use store::{CourseOutline, CourseStore, Lesson, SearchHit, SearchRequest};
pub use tool::{SourceRecord, Tool, ToolInvocation, ToolOutput, ToolRegistry};
