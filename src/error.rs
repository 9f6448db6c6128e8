//! Failure taxonomy for external tool invocation.
//!
//! These errors never cross the public render API: the orchestrator
//! converts each one into a failed strategy and moves on to the next
//! candidate. Malformed diagram input is not an error at all; it
//! surfaces as a tagged `RenderOutcome` instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The process could not be started at all
    #[error("failed to invoke {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit, or an output file expected but not produced.
    /// `detail` is bounded (first 100 chars of stderr).
    #[error("{tool} failed: {detail}")]
    ExecutionFailed { tool: &'static str, detail: String },
}
