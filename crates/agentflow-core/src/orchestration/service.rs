//! Orchestration Service
//!
//! Drives one request through planning, extraction and execution, pushing
//! every stage transition to the caller's sink.

use super::{
    error::PipelineError,
    executor::execute_tasks,
    extract::parse_task_list,
    planner::build_planner_messages,
    sink::EventSink,
    types::{PipelineOutcome, PipelineStage, StreamEvent, Task},
};
use crate::catalog::AgentCatalog;
use crate::llm::{RoleBinding, RoleStatus};
use std::sync::Arc;

/// First status every stream opens with
pub const OUTLINE_STATUS: &str = "Creating outline";

/// Plans a goal into tasks and simulates each agent
pub struct Orchestrator {
    catalog: Arc<AgentCatalog>,
    planner: RoleBinding,
    agent: RoleBinding,
}

impl Orchestrator {
    pub fn new(catalog: Arc<AgentCatalog>, planner: RoleBinding, agent: RoleBinding) -> Self {
        Self {
            catalog,
            planner,
            agent,
        }
    }

    pub fn catalog(&self) -> &AgentCatalog {
        &self.catalog
    }

    /// Provider readiness for the planner and agent roles
    ///
    /// May block: some providers check readiness over the network.
    pub fn role_status(&self) -> Vec<RoleStatus> {
        vec![self.planner.status("planner"), self.agent.status("agent")]
    }

    /// Run the whole pipeline for `goal`
    ///
    /// The sink always receives exactly one terminal event (`done` or
    /// `error`), unless it is closed first.
    pub fn run<S: EventSink + ?Sized>(&self, goal: &str, sink: &S) -> PipelineOutcome {
        let mut run = Run::new();

        let result = self.drive(goal, sink, &mut run);

        match result {
            Ok(tasks) => {
                run.advance(PipelineStage::Done);
                tracing::info!(tasks = tasks.len(), "pipeline finished");
                match sink.emit(StreamEvent::done(tasks.clone())) {
                    Ok(()) => PipelineOutcome::Completed(tasks),
                    Err(_) => PipelineOutcome::Disconnected,
                }
            }
            Err(PipelineError::Disconnected) => {
                tracing::info!(stage = %run.stage, "client disconnected, stopping pipeline");
                PipelineOutcome::Disconnected
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!(stage = %run.stage, error = %message, "pipeline failed");
                run.advance(PipelineStage::Failed);
                match sink.emit(StreamEvent::error(message.clone(), run.raw_output)) {
                    Ok(()) => PipelineOutcome::Failed(message),
                    Err(_) => PipelineOutcome::Disconnected,
                }
            }
        }
    }

    fn drive<S: EventSink + ?Sized>(
        &self,
        goal: &str,
        sink: &S,
        run: &mut Run,
    ) -> Result<Vec<Task>, PipelineError> {
        sink.emit(StreamEvent::status(OUTLINE_STATUS))?;

        run.advance(PipelineStage::Planning);
        tracing::info!(goal_chars = goal.len(), "planning");
        let raw = self
            .planner
            .complete(build_planner_messages(goal, &self.catalog))
            .map_err(PipelineError::Planner)?;

        run.advance(PipelineStage::Extracting);
        let parsed = parse_task_list(&raw);
        run.raw_output = Some(raw);
        let tasks = parsed?;

        let total = tasks.len();
        sink.emit(StreamEvent::status(format!("{} tasks generated", total)))?;

        run.advance(PipelineStage::Executing { total });
        execute_tasks(tasks, &self.catalog, &self.agent, sink)
    }
}

/// Mutable per-request state
struct Run {
    stage: PipelineStage,
    raw_output: Option<String>,
}

impl Run {
    fn new() -> Self {
        Self {
            stage: PipelineStage::Start,
            raw_output: None,
        }
    }

    fn advance(&mut self, next: PipelineStage) {
        debug_assert!(
            !self.stage.is_terminal(),
            "no transition out of a terminal stage"
        );
        tracing::debug!(from = %self.stage, to = %next, "pipeline stage");
        self.stage = next;
    }
}
