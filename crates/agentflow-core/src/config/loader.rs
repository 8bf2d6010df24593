//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.agentflow.toml` in the working directory or the
//! user config directory, then applies environment overrides and validates.

use super::types::{AgentflowConfig, ProviderConfig, ProviderKind, RoleConfig};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing credential for provider '{provider}' (set {hint})")]
    MissingCredential { provider: String, hint: String },

    #[error("Role '{role}' references unknown provider '{provider}'")]
    UnknownProvider { role: String, provider: String },

    #[error("Role '{role}' references disabled provider '{provider}'")]
    ProviderDisabled { role: String, provider: String },

    #[error("Agent catalog is empty")]
    EmptyCatalog,

    #[error("Agent '{0}' is defined more than once")]
    DuplicateAgent(String),

    #[error("Invalid allowed origin: {0}")]
    InvalidOrigin(String),
}

fn env_regex() -> &'static Regex {
    static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
    ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

/// Load and validate configuration
///
/// Priority order:
/// 1. Project-level `.agentflow.toml`
/// 2. User-level `~/.config/agentflow/config.toml`
/// 3. Default configuration
///
/// Environment overrides are applied in every case.
pub fn load_config(project_dir: &Path) -> Result<AgentflowConfig, ConfigError> {
    let config = match find_config_file(project_dir) {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration");
            load_from_file(&path)?
        }
        None => {
            tracing::info!("no configuration file found, using defaults");
            AgentflowConfig::default()
        }
    };

    let config = apply_env_overrides(config, |name| std::env::var(name).ok());
    validate(&config)?;
    Ok(config)
}

fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    let project_config = project_dir.join(".agentflow.toml");
    if project_config.exists() {
        return Some(project_config);
    }

    get_user_config_path().filter(|p| p.exists())
}

/// Get user config directory path
fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("agentflow").join("config.toml"))
}

/// Load configuration from a specific file, expanding `${VAR}` references
pub fn load_from_file(path: &Path) -> Result<AgentflowConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: AgentflowConfig = toml::from_str(&content)?;
    expand_env_vars(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Expand ${VAR} patterns in provider string values
fn expand_env_vars<F>(config: &mut AgentflowConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for provider in config.llm.providers.values_mut() {
        if let Some(ref api_key) = provider.api_key {
            provider.api_key = Some(expand_string(api_key, &lookup));
        }
        if let Some(ref base_url) = provider.base_url {
            provider.base_url = Some(expand_string(base_url, &lookup));
        }
    }
}

/// Expand environment variables in a single string; unknown variables stay as-is
fn expand_string<F>(s: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    env_regex()
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides for common settings
///
/// Supports:
/// - CEREBRAS_API_KEY -> cerebras.api_key
/// - GEMINI_API_KEY / GOOGLE_API_KEY -> gemini.api_key
/// - OPENAI_API_KEY -> openai.api_key (and enables it)
/// - OLLAMA_BASE_URL -> ollama.base_url
/// - AGENTFLOW_PORT -> server.port
/// - AGENTFLOW_ALLOWED_ORIGINS -> server.allowed_origins (comma separated)
pub fn apply_env_overrides<F>(mut config: AgentflowConfig, lookup: F) -> AgentflowConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty("CEREBRAS_API_KEY") {
        provider_entry(&mut config, "cerebras", ProviderKind::OpenAi).api_key = Some(key);
    }

    if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY")) {
        provider_entry(&mut config, "gemini", ProviderKind::Gemini).api_key = Some(key);
    }

    if let Some(key) = non_empty("OPENAI_API_KEY") {
        let provider = provider_entry(&mut config, "openai", ProviderKind::OpenAi);
        provider.api_key = Some(key);
        provider.enabled = true;
    }

    if let Some(url) = non_empty("OLLAMA_BASE_URL") {
        provider_entry(&mut config, "ollama", ProviderKind::Ollama).base_url = Some(url);
    }

    if let Some(port) = non_empty("AGENTFLOW_PORT") {
        match port.trim().parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!(value = %port, "ignoring invalid AGENTFLOW_PORT"),
        }
    }

    if let Some(origins) = non_empty("AGENTFLOW_ALLOWED_ORIGINS") {
        config.server.allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }

    config
}

fn provider_entry<'a>(
    config: &'a mut AgentflowConfig,
    id: &str,
    kind: ProviderKind,
) -> &'a mut ProviderConfig {
    config
        .llm
        .providers
        .entry(id.to_string())
        .or_insert_with(|| ProviderConfig {
            kind,
            enabled: true,
            api_key: None,
            base_url: None,
        })
}

/// Check that every role can be served and the catalog is usable
pub fn validate(config: &AgentflowConfig) -> Result<(), ConfigError> {
    let roles = &config.llm.roles;
    for (role, role_config) in [
        ("planner", &roles.planner),
        ("agent", &roles.agent),
        ("chat", &roles.chat),
    ] {
        validate_role(config, role, role_config)?;
    }

    if config.agents.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }

    let mut seen = HashSet::new();
    for agent in &config.agents {
        if !seen.insert(agent.name.as_str()) {
            return Err(ConfigError::DuplicateAgent(agent.name.clone()));
        }
    }

    Ok(())
}

fn validate_role(
    config: &AgentflowConfig,
    role: &str,
    role_config: &RoleConfig,
) -> Result<(), ConfigError> {
    let provider_id = &role_config.provider;
    let provider = config
        .get_provider(provider_id)
        .ok_or_else(|| ConfigError::UnknownProvider {
            role: role.to_string(),
            provider: provider_id.clone(),
        })?;

    if !provider.enabled {
        return Err(ConfigError::ProviderDisabled {
            role: role.to_string(),
            provider: provider_id.clone(),
        });
    }

    if provider.kind.requires_api_key() && !has_usable_key(provider) {
        return Err(ConfigError::MissingCredential {
            provider: provider_id.clone(),
            hint: credential_hint(provider_id),
        });
    }

    Ok(())
}

fn has_usable_key(provider: &ProviderConfig) -> bool {
    provider
        .api_key
        .as_deref()
        .map(|key| !key.trim().is_empty() && !env_regex().is_match(key))
        .unwrap_or(false)
}

fn credential_hint(provider_id: &str) -> String {
    match provider_id {
        "cerebras" => "CEREBRAS_API_KEY".to_string(),
        "gemini" => "GEMINI_API_KEY".to_string(),
        "openai" => "OPENAI_API_KEY".to_string(),
        other => format!("llm.providers.{}.api_key", other),
    }
}

/// Sample configuration file content, printed by `agentflow-server --print-config`
pub fn sample_config() -> &'static str {
    r#"# agentflow configuration
# Place this file in the working directory as .agentflow.toml
# or in ~/.config/agentflow/config.toml for global settings

[server]
port = 8000
# "*" allows any origin
allowed_origins = ["http://localhost:3000"]

[llm]
# Request timeout in seconds
timeout = 120

[llm.providers.cerebras]
kind = "openai"
api_key = "${CEREBRAS_API_KEY}"
base_url = "https://api.cerebras.ai/v1"

[llm.providers.gemini]
kind = "gemini"
api_key = "${GEMINI_API_KEY}"
base_url = "https://generativelanguage.googleapis.com"

[llm.roles.planner]
provider = "cerebras"
model = "qwen-3-235b-a22b-instruct-2507"
max_tokens = 2000
temperature = 0.7

[llm.roles.agent]
provider = "cerebras"
model = "gpt-oss-120b"

[llm.roles.chat]
provider = "gemini"
model = "gemini-2.5-flash-lite"

[[agents]]
name = "LinkedIn"
description = "Search and recruit candidates using LinkedIn Recruiter-style natural language queries."
url = "https://www.linkedin.com/"

[[agents]]
name = "Gemini"
description = "Generate supporting content, summaries, and outreach messaging."
url = "https://workspace.google.com/"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn with_keys() -> AgentflowConfig {
        apply_env_overrides(
            AgentflowConfig::default(),
            env(&[("CEREBRAS_API_KEY", "csk-test"), ("GEMINI_API_KEY", "g-test")]),
        )
    }

    #[test]
    fn test_default_config() {
        let config = AgentflowConfig::default();
        assert_eq!(config.server.port, 8000);
        assert!(config.server.allows_any_origin());
        assert_eq!(config.llm.roles.planner.provider, "cerebras");
        assert_eq!(config.llm.roles.chat.provider, "gemini");
        assert_eq!(config.agents.len(), 3);
    }

    #[test]
    fn test_expand_env_var() {
        let lookup = env(&[("TEST_VAR", "test_value")]);
        let result = expand_string("prefix_${TEST_VAR}_suffix", &lookup);
        assert_eq!(result, "prefix_test_value_suffix");
    }

    #[test]
    fn test_missing_env_var() {
        let lookup = env(&[]);
        let result = expand_string("${NONEXISTENT_VAR}", &lookup);
        assert_eq!(result, "${NONEXISTENT_VAR}");
    }

    #[test]
    fn test_defaults_without_credentials_are_rejected() {
        let err = validate(&AgentflowConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential { ref provider, .. } if provider == "cerebras"
        ));
        assert!(err.to_string().contains("CEREBRAS_API_KEY"));
    }

    #[test]
    fn test_missing_chat_credential_is_rejected() {
        let config = apply_env_overrides(
            AgentflowConfig::default(),
            env(&[("CEREBRAS_API_KEY", "csk-test")]),
        );
        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential { ref provider, .. } if provider == "gemini"
        ));
    }

    #[test]
    fn test_env_overrides_satisfy_validation() {
        let config = with_keys();
        validate(&config).unwrap();
        assert_eq!(
            config.get_provider("cerebras").and_then(|p| p.api_key.clone()),
            Some("csk-test".to_string())
        );
    }

    #[test]
    fn test_google_key_is_accepted_for_gemini() {
        let config = apply_env_overrides(
            AgentflowConfig::default(),
            env(&[("GOOGLE_API_KEY", "g-alt")]),
        );
        assert_eq!(
            config.get_provider("gemini").and_then(|p| p.api_key.clone()),
            Some("g-alt".to_string())
        );
    }

    #[test]
    fn test_unexpanded_key_counts_as_missing() {
        let mut config = with_keys();
        if let Some(provider) = config.llm.providers.get_mut("gemini") {
            provider.api_key = Some("${GEMINI_API_KEY}".to_string());
        }
        assert!(matches!(
            validate(&config),
            Err(ConfigError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_unknown_and_disabled_providers() {
        let mut config = with_keys();
        config.llm.roles.agent.provider = "nope".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::UnknownProvider { ref role, .. }) if role == "agent"
        ));

        let mut config = with_keys();
        config.llm.roles.agent.provider = "ollama".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ProviderDisabled { .. })
        ));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let mut config = with_keys();
        if let Some(ollama) = config.llm.providers.get_mut("ollama") {
            ollama.enabled = true;
        }
        config.llm.roles.agent.provider = "ollama".to_string();
        validate(&config).unwrap();
    }

    #[test]
    fn test_catalog_validation() {
        let mut config = with_keys();
        config.agents.clear();
        assert!(matches!(validate(&config), Err(ConfigError::EmptyCatalog)));

        let mut config = with_keys();
        let first = config.agents[0].clone();
        config.agents.push(first);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::DuplicateAgent(ref name)) if name == "LinkedIn"
        ));
    }

    #[test]
    fn test_server_overrides() {
        let config = apply_env_overrides(
            AgentflowConfig::default(),
            env(&[
                ("AGENTFLOW_PORT", "9100"),
                ("AGENTFLOW_ALLOWED_ORIGINS", "http://localhost:3000, http://a.test"),
            ]),
        );
        assert_eq!(config.server.port, 9100);
        assert_eq!(
            config.server.allowed_origins,
            vec!["http://localhost:3000", "http://a.test"]
        );
        assert!(!config.server.allows_any_origin());
    }

    #[test]
    fn test_sample_config_parses() {
        let config: AgentflowConfig = toml::from_str(sample_config()).unwrap();
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.llm.roles.agent.model, "gpt-oss-120b");
        assert_eq!(config.llm.roles.agent.max_tokens, 2000);
        assert_eq!(
            config.get_provider("cerebras").map(|p| p.kind),
            Some(ProviderKind::OpenAi)
        );
    }

    #[test]
    fn test_load_from_file_expands_known_vars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".agentflow.toml");
        std::fs::write(
            &path,
            r#"
[llm.providers.cerebras]
kind = "openai"
api_key = "${AGENTFLOW_TEST_SURELY_UNSET_VAR}"
base_url = "https://api.cerebras.ai/v1"
"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(
            config.get_provider("cerebras").and_then(|p| p.api_key.clone()),
            Some("${AGENTFLOW_TEST_SURELY_UNSET_VAR}".to_string())
        );
        // Providers table replaced wholesale by the file
        assert!(config.get_provider("gemini").is_none());
        assert_eq!(config.agents.len(), 3);
    }
}
