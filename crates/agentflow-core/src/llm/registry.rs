//! Provider registry and role bindings

use super::{
    ChatMessage, CompletionRequest, GeminiProvider, LlmError, OllamaProvider,
    OpenAiCompatProvider, ProviderStatus, SharedProvider,
};
use crate::config::{LlmConfig, ProviderKind, RoleConfig};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Registry of the providers built from configuration
pub struct ProviderRegistry {
    providers: HashMap<String, SharedProvider>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Build every enabled provider; providers missing a required key are skipped
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout))
            .build();

        let mut registry = Self::new();

        for (id, provider) in config.providers.iter().filter(|(_, p)| p.enabled) {
            let api_key = provider.api_key.clone().unwrap_or_default();
            if provider.kind.requires_api_key() && api_key.trim().is_empty() {
                tracing::debug!(provider = %id, "skipping provider without API key");
                continue;
            }

            let shared: SharedProvider = match provider.kind {
                ProviderKind::OpenAi => Arc::new(OpenAiCompatProvider::new(
                    id,
                    &api_key,
                    provider
                        .base_url
                        .as_deref()
                        .unwrap_or("https://api.openai.com/v1"),
                    client.clone(),
                )),
                ProviderKind::Gemini => Arc::new(GeminiProvider::new(
                    &api_key,
                    provider
                        .base_url
                        .as_deref()
                        .unwrap_or("https://generativelanguage.googleapis.com"),
                    client.clone(),
                )),
                ProviderKind::Ollama => Arc::new(OllamaProvider::new(
                    provider
                        .base_url
                        .as_deref()
                        .unwrap_or("http://localhost:11434"),
                    client.clone(),
                )),
            };

            registry.providers.insert(id.clone(), shared);
        }

        registry
    }

    /// Register a provider under an explicit id
    pub fn register(&mut self, id: &str, provider: SharedProvider) {
        self.providers.insert(id.to_string(), provider);
    }

    /// Get a provider by ID
    pub fn get(&self, id: &str) -> Option<SharedProvider> {
        self.providers.get(id).cloned()
    }

    /// Get all registered provider IDs
    pub fn provider_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Resolve a role to the provider and parameters that serve it
    pub fn bind(&self, role: &RoleConfig) -> Result<RoleBinding, LlmError> {
        let provider = self.get(&role.provider).ok_or_else(|| {
            LlmError::ProviderUnavailable(format!("Provider '{}' not registered", role.provider))
        })?;

        Ok(RoleBinding {
            provider,
            model: role.model.clone(),
            max_tokens: role.max_tokens,
            temperature: role.temperature,
        })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A provider plus the model and sampling parameters for one role
#[derive(Clone)]
pub struct RoleBinding {
    pub provider: SharedProvider,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl RoleBinding {
    pub fn new(provider: SharedProvider, model: &str) -> Self {
        Self {
            provider,
            model: model.to_string(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }

    /// Build the request for a conversation
    pub fn request(&self, messages: Vec<ChatMessage>) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Run one completion
    pub fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let request = self.request(messages);
        tracing::debug!(
            provider = self.provider.id(),
            model = %self.model,
            prompt_chars = request.prompt_len(),
            "sending completion request"
        );
        self.provider.complete(&request)
    }

    /// Readiness of the bound provider, labelled with `role`
    pub fn status(&self, role: &str) -> RoleStatus {
        let (ready, reason) = match self.provider.status() {
            ProviderStatus::Ready => (true, None),
            ProviderStatus::Unavailable(reason) => (false, Some(reason)),
        };
        RoleStatus {
            role: role.to_string(),
            provider: self.provider.id().to_string(),
            model: self.model.clone(),
            ready,
            reason,
        }
    }
}

/// Health of one role's provider, as reported by `/health`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleStatus {
    pub role: String,
    pub provider: String,
    pub model: String,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl std::fmt::Debug for RoleBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleBinding")
            .field("provider", &self.provider.id())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}
