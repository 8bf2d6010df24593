//! Agent executor
//!
//! Runs each planned task through a simulated agent, strictly in order.

use super::error::PipelineError;
use super::sink::EventSink;
use super::types::{StreamEvent, Task};
use crate::catalog::{AgentCatalog, AgentProfile};
use crate::llm::{ChatMessage, RoleBinding};

/// Render the impersonation prompt for one task
pub fn build_agent_prompt(task: &Task, profile: &AgentProfile) -> String {
    let mut prompt = format!(
        "You are a {} agent.\n\nCapabilities:\n{}\n\n",
        profile.name, profile.description
    );

    if let Some(url) = &task.url {
        prompt.push_str(&format!("Website:\n{}\n\n", url));
    }

    prompt.push_str(&format!(
        "Task:\n{}\n\nProduce a realistic sample output.",
        task.prompt
    ));
    prompt
}

/// Execute every task in order, filling in `output`
///
/// Emits `i/n` progress before each agent call. The first failure aborts
/// the remaining tasks and nothing partial is returned.
pub fn execute_tasks<S: EventSink + ?Sized>(
    mut tasks: Vec<Task>,
    catalog: &AgentCatalog,
    agent: &RoleBinding,
    sink: &S,
) -> Result<Vec<Task>, PipelineError> {
    let total = tasks.len();

    for (index, task) in tasks.iter_mut().enumerate() {
        let profile = catalog
            .get(&task.agent)
            .ok_or_else(|| PipelineError::UnknownAgent {
                agent: task.agent.clone(),
                known: catalog.names().join(", "),
            })?;

        sink.emit(StreamEvent::progress(index, total, &task.agent))?;
        tracing::info!(agent = %task.agent, step = index + 1, total, "running agent");

        let messages = vec![ChatMessage::user(build_agent_prompt(task, profile))];
        let output = agent
            .complete(messages)
            .map_err(|source| PipelineError::AgentCall {
                agent: task.agent.clone(),
                source,
            })?;

        task.output = Some(output);
    }

    Ok(tasks)
}
