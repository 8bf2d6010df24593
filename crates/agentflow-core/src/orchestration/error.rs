//! Pipeline failures
//!
//! Each of these ends a request with a single `error` event, except
//! `Disconnected`, which ends it silently.

use super::extract::ExtractError;
use super::sink::SinkClosed;
use crate::llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// The planning call itself failed
    #[error("Planner call failed: {0}")]
    Planner(LlmError),

    /// The planner answered with something that is not a task list
    #[error("Could not parse planner output: {0}")]
    MalformedPlan(#[from] ExtractError),

    /// A task names an agent missing from the catalog
    #[error("Unknown agent '{agent}' (known agents: {known})")]
    UnknownAgent { agent: String, known: String },

    /// A simulated agent call failed
    #[error("Agent '{agent}' call failed: {source}")]
    AgentCall { agent: String, source: LlmError },

    /// The client stopped listening
    #[error("Client disconnected")]
    Disconnected,
}

impl From<SinkClosed> for PipelineError {
    fn from(_: SinkClosed) -> Self {
        PipelineError::Disconnected
    }
}
