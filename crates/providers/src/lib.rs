//! Generation backend implementations for Lectern.
//!
//! Currently one backend: the Anthropic Messages API. The round loop only
//! sees the `GenerationBackend` trait, so additional backends slot in
//! without touching the orchestration core.

pub mod anthropic;

pub use anthropic::AnthropicGeneration;
