//! OpenAI-compatible LLM provider
//!
//! Speaks the `/chat/completions` protocol shared by OpenAI, Cerebras and
//! most local proxies.

use super::message::openai_messages;
use super::{CompletionProvider, CompletionRequest, LlmError, ProviderStatus};

/// OpenAI-compatible provider
pub struct OpenAiCompatProvider {
    /// Registry id (e.g. "cerebras", "openai")
    id: String,

    /// API key
    api_key: String,

    /// Base URL for the API, including the version segment
    base_url: String,

    /// HTTP client
    client: ureq::Agent,
}

impl OpenAiCompatProvider {
    /// Create a new provider against `base_url`
    pub fn new(id: &str, api_key: &str, base_url: &str, client: ureq::Agent) -> Self {
        Self {
            id: id.to_string(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

impl CompletionProvider for OpenAiCompatProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        match self.id.as_str() {
            "cerebras" => "Cerebras",
            "openai" => "OpenAI",
            _ => "OpenAI-compatible",
        }
    }

    fn status(&self) -> ProviderStatus {
        if self.api_key.is_empty() {
            ProviderStatus::Unavailable("No API key configured".to_string())
        } else {
            ProviderStatus::Ready
        }
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": request.model,
            "messages": openai_messages(&request.messages),
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "stream": false
        });

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)?;

        let json: serde_json::Value = response.into_json()?;
        parse_chat_completion(&json)
    }
}

/// Pull `choices[0].message.content` out of a chat completion body
pub(crate) fn parse_chat_completion(json: &serde_json::Value) -> Result<String, LlmError> {
    if let Some(error) = json.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(LlmError::Api {
            status: 500,
            message: message.to_string(),
        });
    }

    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| LlmError::InvalidResponse("missing choices[0].message.content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_completion() {
        let json = serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}]
        });
        assert_eq!(parse_chat_completion(&json).unwrap(), "hello");
    }

    #[test]
    fn test_parse_error_body() {
        let json = serde_json::json!({"error": {"message": "model overloaded"}});
        assert_eq!(
            parse_chat_completion(&json),
            Err(LlmError::Api {
                status: 500,
                message: "model overloaded".to_string()
            })
        );
    }

    #[test]
    fn test_parse_missing_content() {
        let json = serde_json::json!({"choices": []});
        assert!(matches!(
            parse_chat_completion(&json),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_without_key() {
        let provider = OpenAiCompatProvider::new("openai", "", "https://x.test/v1/", ureq::agent());
        assert!(!provider.status().is_ready());
        assert_eq!(provider.base_url, "https://x.test/v1");
        assert_eq!(provider.name(), "OpenAI");
    }
}
