//! Task orchestration pipeline
//!
//! One request flows strictly downward:
//! - Planner: one completion that decomposes the goal into tasks
//! - Extractor: recovers the JSON task list from the planner's text
//! - Executor: one simulated-agent completion per task, in order
//! - Sink: every stage transition is pushed to the caller as it happens
//!
//! # Example
//!
//! ```no_run
//! use agentflow_core::orchestration::{Orchestrator, StreamEvent};
//! # fn demo(orchestrator: Orchestrator) {
//! let (tx, mut rx) = tokio::sync::mpsc::channel::<StreamEvent>(16);
//! std::thread::spawn(move || orchestrator.run("Hire 3 backend engineers", &tx));
//! while let Some(event) = rx.blocking_recv() {
//!     println!("{}", serde_json::to_string(&event).unwrap());
//! }
//! # }
//! ```

mod chat;
mod error;
mod executor;
mod extract;
mod planner;
mod service;
mod sink;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::{build_chat_prompt, ChatAssistant};
pub use error::PipelineError;
pub use executor::{build_agent_prompt, execute_tasks};
pub use extract::{clean_planner_output, parse_task_list, ExtractError};
pub use planner::{build_planner_messages, build_planner_prompt};
pub use service::{Orchestrator, OUTLINE_STATUS};
pub use sink::{EventSink, SinkClosed};
pub use types::{PipelineOutcome, PipelineStage, StreamEvent, Task, DONE_MARKER};
