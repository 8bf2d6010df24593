//! Google Gemini LLM provider
//!
//! Uses the `generateContent` endpoint; system messages become the
//! request's `systemInstruction`.

use super::{ChatMessage, CompletionProvider, CompletionRequest, LlmError, ProviderStatus, Role};

/// Gemini provider
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: ureq::Agent,
}

impl GeminiProvider {
    pub fn new(api_key: &str, base_url: &str, client: ureq::Agent) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

impl CompletionProvider for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    fn name(&self) -> &str {
        "Google Gemini"
    }

    fn status(&self) -> ProviderStatus {
        if self.api_key.is_empty() {
            ProviderStatus::Unavailable("No API key configured".to_string())
        } else {
            ProviderStatus::Ready
        }
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );

        let response = self
            .client
            .post(&url)
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", &self.api_key)
            .send_json(&build_request_body(request))?;

        let json: serde_json::Value = response.into_json()?;
        parse_generate_content(&json)
    }
}

fn build_request_body(request: &CompletionRequest) -> serde_json::Value {
    let system: Vec<&ChatMessage> = request
        .messages
        .iter()
        .filter(|m| m.role == Role::System)
        .collect();

    let contents: Vec<serde_json::Value> = request
        .messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| {
            serde_json::json!({
                "role": match m.role {
                    Role::Assistant => "model",
                    _ => "user",
                },
                "parts": [{"text": m.content}]
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "contents": contents,
        "generationConfig": {
            "maxOutputTokens": request.max_tokens,
            "temperature": request.temperature
        }
    });

    if !system.is_empty() {
        let text = system
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        body["systemInstruction"] = serde_json::json!({ "parts": [{"text": text}] });
    }

    body
}

/// Concatenate the text parts of the first candidate
fn parse_generate_content(json: &serde_json::Value) -> Result<String, LlmError> {
    if let Some(error) = json.get("error") {
        let status = error
            .get("code")
            .and_then(|c| c.as_u64())
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(500);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(LlmError::Api {
            status,
            message: message.to_string(),
        });
    }

    let parts = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| LlmError::InvalidResponse("missing candidates[0].content.parts".to_string()))?;

    Ok(parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .concat())
}
