//! Ollama LLM provider
//!
//! Connects to a local Ollama instance for chat completions.

use super::message::openai_messages;
use super::{CompletionProvider, CompletionRequest, LlmError, ProviderStatus};
use std::time::Duration;

/// Ollama provider for local LLM inference
pub struct OllamaProvider {
    /// Base URL for Ollama API
    base_url: String,

    client: ureq::Agent,
}

impl OllamaProvider {
    pub fn new(base_url: &str, client: ureq::Agent) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Check if Ollama is running
    fn check_connection(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        self.client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .call()
            .is_ok()
    }
}

impl CompletionProvider for OllamaProvider {
    fn id(&self) -> &str {
        "ollama"
    }

    fn name(&self) -> &str {
        "Ollama"
    }

    fn status(&self) -> ProviderStatus {
        if self.check_connection() {
            ProviderStatus::Ready
        } else {
            ProviderStatus::Unavailable("Cannot connect to Ollama".to_string())
        }
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": request.model,
            "messages": openai_messages(&request.messages),
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens
            }
        });

        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(&body)?;

        let json: serde_json::Value = response.into_json()?;

        json.get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::InvalidResponse("missing message.content".to_string()))
    }
}
