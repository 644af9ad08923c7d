//! # Lectern Engine
//!
//! The sequential tool-calling orchestrator behind Lectern's query
//! answering. One query runs as a bounded series of generation rounds:
//! the model is offered the course tools, any invocations it requests
//! are executed and fed back, and a repeated invocation or the round cap
//! forces a final tools-disabled synthesis call. A model that answers
//! directly short-circuits all of that.
//!
//! `RagEngine` is the entry point; `RoundLoop` is the loop itself, usable
//! on its own when session handling and prompt wrapping are not wanted.

pub mod loop_guard;
pub mod rounds;
pub mod system;
pub mod transcript;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use rounds::{RoundLoop, RoundOutcome, Termination};
pub use system::{CatalogAnalytics, QueryAnswer, RagEngine};
pub use transcript::Transcript;
