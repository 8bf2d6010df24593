//! Configuration module for agentflow
//!
//! Handles loading and parsing of `.agentflow.toml` configuration files
//! with support for environment variable expansion.

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, load_config, load_from_file, sample_config, validate, ConfigError,
};
pub use types::{
    default_agents, AgentConfig, AgentflowConfig, LlmConfig, ProviderConfig, ProviderKind,
    RoleConfig, RolesConfig, ServerConfig,
};
