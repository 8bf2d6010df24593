//! Configuration types for agentflow
//!
//! Defines the structure of `.agentflow.toml` configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentflowConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Agents the planner may assign work to, in prompt order
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentConfig>,
}

impl Default for AgentflowConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            agents: default_agents(),
        }
    }
}

/// HTTP server section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; `*` permits any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl ServerConfig {
    /// Whether every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o.trim() == "*")
    }
}

/// LLM configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Provider configurations keyed by provider id
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,

    /// Which provider and model serves each pipeline role
    #[serde(default)]
    pub roles: RolesConfig,
}

fn default_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            providers: default_providers(),
            roles: RolesConfig::default(),
        }
    }
}

/// Wire protocol spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions (OpenAI, Cerebras, local proxies)
    OpenAi,
    /// Google Gemini generateContent
    Gemini,
    /// Local Ollama instance
    Ollama,
}

impl ProviderKind {
    /// Whether this kind of provider refuses requests without an API key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }
}

/// Individual provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Wire protocol
    pub kind: ProviderKind,

    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the API
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind, base_url: &str) -> Self {
        Self {
            kind,
            enabled: true,
            api_key: None,
            base_url: Some(base_url.to_string()),
        }
    }
}

/// Create default provider configurations
fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();

    // Cerebras speaks the OpenAI chat completions protocol
    providers.insert(
        "cerebras".to_string(),
        ProviderConfig::new(ProviderKind::OpenAi, "https://api.cerebras.ai/v1"),
    );

    providers.insert(
        "gemini".to_string(),
        ProviderConfig::new(
            ProviderKind::Gemini,
            "https://generativelanguage.googleapis.com",
        ),
    );

    // Only registered when OPENAI_API_KEY is present
    let mut openai = ProviderConfig::new(ProviderKind::OpenAi, "https://api.openai.com/v1");
    openai.enabled = false;
    providers.insert("openai".to_string(), openai);

    let mut ollama = ProviderConfig::new(ProviderKind::Ollama, "http://localhost:11434");
    ollama.enabled = false;
    providers.insert("ollama".to_string(), ollama);

    providers
}

/// Role assignments for the three kinds of completion the service makes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesConfig {
    /// Decomposes the user's goal into tasks
    #[serde(default = "default_planner_role")]
    pub planner: RoleConfig,

    /// Simulates each agent's output
    #[serde(default = "default_agent_role")]
    pub agent: RoleConfig,

    /// Answers `/chat`
    #[serde(default = "default_chat_role")]
    pub chat: RoleConfig,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            planner: default_planner_role(),
            agent: default_agent_role(),
            chat: default_chat_role(),
        }
    }
}

/// Provider, model and sampling parameters for one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Provider id (key of `llm.providers`)
    pub provider: String,

    /// Model name passed to the provider
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.7
}

impl RoleConfig {
    pub fn new(provider: &str, model: &str) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_planner_role() -> RoleConfig {
    RoleConfig::new("cerebras", "qwen-3-235b-a22b-instruct-2507")
}

fn default_agent_role() -> RoleConfig {
    RoleConfig::new("cerebras", "gpt-oss-120b")
}

fn default_chat_role() -> RoleConfig {
    RoleConfig::new("gemini", "gemini-2.5-flash-lite")
}

/// One entry of the agent catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Name the planner must use in the `agent` field
    pub name: String,

    /// Capability description shown to the planner and the simulated agent
    pub description: String,

    /// Primary website the agent operates on
    #[serde(default)]
    pub url: Option<String>,
}

impl AgentConfig {
    pub fn new(name: &str, description: &str, url: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            url: url.map(str::to_string),
        }
    }
}

/// Recruiting-oriented default catalog
pub fn default_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig::new(
            "LinkedIn",
            "Search and recruit candidates using LinkedIn Recruiter-style natural language queries.",
            Some("https://www.linkedin.com/"),
        ),
        AgentConfig::new(
            "Gemini",
            "Generate supporting content, summaries, and outreach messaging.",
            Some("https://workspace.google.com/"),
        ),
        AgentConfig::new(
            "SimpleAI(S24)",
            "Handle automated outreach or follow-up communication.",
            Some("https://www.simple.ai/"),
        ),
    ]
}

impl AgentflowConfig {
    /// Get a provider config by id
    pub fn get_provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.llm.providers.get(id)
    }
}
