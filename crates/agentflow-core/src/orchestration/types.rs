//! Orchestration types
//!
//! Tasks produced by the planner and the events streamed back to clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of work assigned to a catalog agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Catalog agent name
    pub agent: String,
    /// Display name
    pub label: String,
    /// Instruction passed to the simulated agent
    pub prompt: String,
    /// Website the agent should operate on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Simulated output, set once the executor has run this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Any other fields the planner returned, echoed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(agent: impl Into<String>, label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            label: label.into(),
            prompt: prompt.into(),
            url: None,
            output: None,
            extra: Map::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Marker carried by the terminal success event
pub const DONE_MARKER: &str = "done";

/// One JSON object pushed to the client
///
/// Serialized untagged; the field names identify the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamEvent {
    /// Stage narration, e.g. "Creating outline"
    Status { status: String },

    /// Terminal success with the fully populated task list
    Done { progress: String, result: Vec<Task> },

    /// Start of work on task `i` of `n`
    Progress { progress: String, agent: String },

    /// Terminal failure
    Error {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw_output: Option<String>,
    },
}

impl StreamEvent {
    pub fn status(status: impl Into<String>) -> Self {
        StreamEvent::Status {
            status: status.into(),
        }
    }

    /// Progress marker for 0-based `index` out of `total`
    pub fn progress(index: usize, total: usize, agent: impl Into<String>) -> Self {
        StreamEvent::Progress {
            progress: format!("{}/{}", index + 1, total),
            agent: agent.into(),
        }
    }

    pub fn done(result: Vec<Task>) -> Self {
        StreamEvent::Done {
            progress: DONE_MARKER.to_string(),
            result,
        }
    }

    pub fn error(error: impl Into<String>, raw_output: Option<String>) -> Self {
        StreamEvent::Error {
            error: error.into(),
            raw_output,
        }
    }

    /// Whether the stream ends after this event
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done { .. } | StreamEvent::Error { .. })
    }
}

/// Pipeline states, in the order a successful request passes through them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Planning,
    Extracting,
    Executing { total: usize },
    Done,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Start => write!(f, "start"),
            PipelineStage::Planning => write!(f, "planning"),
            PipelineStage::Extracting => write!(f, "extracting"),
            PipelineStage::Executing { total } => write!(f, "executing {} tasks", total),
            PipelineStage::Done => write!(f, "done"),
            PipelineStage::Failed => write!(f, "error"),
        }
    }
}

/// How a pipeline run ended
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// All tasks ran; the `done` event was emitted
    Completed(Vec<Task>),
    /// A terminal `error` event was emitted
    Failed(String),
    /// The client went away; the run stopped without a terminal event
    Disconnected,
}
