//! agentflow core - backend library for agentflow
//!
//! This crate provides the transport-agnostic functionality:
//! - Configuration loading and validation
//! - The agent catalog
//! - LLM providers (OpenAI-compatible, Gemini, Ollama)
//! - The planning/execution pipeline and its event stream
//!
//! Any front end (HTTP, CLI) drives it through [`Orchestrator::run`] with an
//! [`EventSink`].
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐  goal + sink  ┌──────────────────┐  completions  ┌─────────┐
//! │  Front end    │ ─────────────→│  Orchestrator    │ ─────────────→│   LLM   │
//! │ (HTTP, CLI)   │ ←─────────────│  planner/agents  │ ←─────────────│ provider│
//! └───────────────┘  StreamEvent  └──────────────────┘               └─────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod llm;
pub mod orchestration;

pub use catalog::{AgentCatalog, AgentProfile};
pub use config::{load_config, AgentflowConfig, ConfigError};
pub use error::{Error, Result};
pub use llm::{
    ChatMessage, CompletionProvider, CompletionRequest, LlmError, ProviderRegistry, RoleBinding,
    RoleStatus, SharedProvider,
};
pub use orchestration::{
    ChatAssistant, EventSink, Orchestrator, PipelineOutcome, StreamEvent, Task,
};

use std::sync::Arc;

/// Everything a front end needs, built once at startup
pub struct Runtime {
    pub catalog: Arc<AgentCatalog>,
    pub orchestrator: Arc<Orchestrator>,
    pub assistant: Arc<ChatAssistant>,
}

impl Runtime {
    /// Validate `config`, then build providers and role bindings from it
    pub fn from_config(config: &AgentflowConfig) -> Result<Self> {
        config::validate(config)?;
        let registry = ProviderRegistry::from_config(&config.llm);
        let roles = &config.llm.roles;

        let catalog = Arc::new(AgentCatalog::from_config(&config.agents));
        let orchestrator = Orchestrator::new(
            catalog.clone(),
            registry.bind(&roles.planner)?,
            registry.bind(&roles.agent)?,
        );
        let assistant = ChatAssistant::new(registry.bind(&roles.chat)?);

        tracing::info!(
            providers = ?registry.provider_ids(),
            agents = ?catalog.names(),
            "runtime ready"
        );

        Ok(Self {
            catalog,
            orchestrator: Arc::new(orchestrator),
            assistant: Arc::new(assistant),
        })
    }
}

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
