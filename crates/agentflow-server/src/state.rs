//! Server state management

use agentflow_core::{AgentCatalog, ChatAssistant, Orchestrator, Runtime};
use std::sync::Arc;

/// Shared application state; everything in it is read-only
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<AgentCatalog>,
    pub orchestrator: Arc<Orchestrator>,
    pub assistant: Arc<ChatAssistant>,
}

impl AppState {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            catalog: runtime.catalog,
            orchestrator: runtime.orchestrator,
            assistant: runtime.assistant,
        }
    }
}
