//! The sequential tool-calling round loop.
//!
//! Each query runs up to `max_rounds` rounds. A round is one generation
//! call with tools offered; if the model requests invocations they are
//! executed in order, their results batched into one user turn, and the
//! loop continues. The loop leaves through one of three doors:
//!
//! - **Natural**: the model requested no invocations. Its text is the
//!   answer and no further call is made.
//! - **Loop detected**: some invocation repeats one already executed in a
//!   prior round. The round's blocks are discarded and a final
//!   tools-disabled synthesis call produces the answer.
//! - **Round cap**: the last allowed round completed with tool use. Its
//!   results are kept and a final tools-disabled synthesis call produces
//!   the answer.
//!
//! Tool outputs carry their citation sources; the loop accumulates them
//! in execution order across rounds and returns them with the answer.

use std::sync::Arc;

use lectern_core::{
    ContentBlock, Error, GenerationBackend, GenerationRequest, SourceRecord, ToolInvocation,
    ToolRegistry,
};
use tracing::{debug, info, warn};

use crate::loop_guard;
use crate::transcript::Transcript;

/// How a query's rounds ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The model answered without requesting tools.
    Natural,
    /// A round repeated an invocation from a prior round.
    LoopDetected,
    /// The last allowed round still requested tools.
    RoundCapReached,
}

/// The result of running a query through the round loop.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// The final answer text
    pub answer: String,

    /// All citation sources emitted by tool executions, in execution order
    pub sources: Vec<SourceRecord>,

    /// Which exit the loop took
    pub termination: Termination,
}

/// Runs the round loop for one query at a time. Holds no per-query state,
/// so one instance serves concurrent queries.
pub struct RoundLoop {
    backend: Arc<dyn GenerationBackend>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_rounds: usize,
}

impl RoundLoop {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
        max_rounds: usize,
    ) -> Self {
        Self {
            backend,
            tools,
            system_prompt: system_prompt.into(),
            max_rounds,
        }
    }

    fn system_content(&self, history: Option<&str>) -> String {
        match history {
            Some(history) => {
                format!("{}\n\nPrevious conversation:\n{history}", self.system_prompt)
            }
            None => self.system_prompt.clone(),
        }
    }

    /// Run one query through the loop.
    ///
    /// Any generation or tool failure aborts the query; partial transcripts
    /// are dropped with it.
    pub async fn execute(&self, query: &str, history: Option<&str>) -> Result<RoundOutcome, Error> {
        let system = self.system_content(history);
        let mut transcript = Transcript::new(query);
        let mut sources: Vec<SourceRecord> = Vec::new();
        let mut used_invocations: Vec<ToolInvocation> = Vec::new();

        let termination = 'rounds: {
            for round in 1..=self.max_rounds {
                debug!(round, backend = self.backend.name(), "starting tool round");
                let outcome = self
                    .backend
                    .generate(GenerationRequest {
                        messages: transcript.messages(),
                        system: system.clone(),
                        tools: self.tools.definitions(),
                    })
                    .await?;

                let invocations = outcome.tool_invocations();
                if invocations.is_empty() {
                    // Covers both a plain text answer and a degenerate
                    // tool_use stop with no invocation blocks.
                    info!(round, "query answered without tool use");
                    return Ok(RoundOutcome {
                        answer: outcome.text(),
                        sources,
                        termination: Termination::Natural,
                    });
                }

                if loop_guard::is_repeat(&invocations, &used_invocations) {
                    warn!(round, "repeated tool invocation, breaking out of rounds");
                    break 'rounds Termination::LoopDetected;
                }

                let mut result_blocks = Vec::with_capacity(invocations.len());
                for invocation in &invocations {
                    debug!(tool = %invocation.name, id = %invocation.id, "executing tool");
                    let output = self.tools.execute(invocation).await?;
                    sources.extend(output.sources);
                    result_blocks.push(ContentBlock::ToolResult {
                        tool_use_id: invocation.id.clone(),
                        content: output.content,
                    });
                }

                transcript.push_round(outcome.content, result_blocks);
                used_invocations.extend(invocations);

                if round == self.max_rounds {
                    info!(round, "tool round cap reached");
                    break 'rounds Termination::RoundCapReached;
                }
            }
            // Unreachable: the cap round always breaks, and max_rounds is
            // validated to be at least 1.
            Termination::RoundCapReached
        };

        // One final call with tools withheld so the model must answer.
        let outcome = self
            .backend
            .generate(GenerationRequest {
                messages: transcript.messages(),
                system,
                tools: Vec::new(),
            })
            .await?;

        info!(
            termination = ?termination,
            transcript_len = transcript.len(),
            source_count = sources.len(),
            "query synthesized"
        );
        Ok(RoundOutcome {
            answer: outcome.text(),
            sources,
            termination,
        })
    }
}
