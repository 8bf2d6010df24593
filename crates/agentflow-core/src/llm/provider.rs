//! LLM provider trait

use super::{CompletionRequest, LlmError};

/// Provider status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Ready to accept requests
    Ready,

    /// Not available (no API key, server down, etc.)
    Unavailable(String),
}

impl ProviderStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProviderStatus::Ready)
    }
}

/// A hosted text-completion service
///
/// Implementations block the calling thread for the duration of one HTTP
/// round-trip; async callers run them on a blocking worker.
pub trait CompletionProvider: Send + Sync {
    /// Get the provider's unique identifier (e.g., "cerebras", "gemini")
    fn id(&self) -> &str;

    /// Get the provider's display name
    fn name(&self) -> &str;

    /// Get current provider status
    fn status(&self) -> ProviderStatus;

    /// Submit the messages and return the completion text
    fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Shared handle to a provider
pub type SharedProvider = std::sync::Arc<dyn CompletionProvider>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_status_ready() {
        assert!(ProviderStatus::Ready.is_ready());
    }

    #[test]
    fn test_provider_status_unavailable() {
        let status = ProviderStatus::Unavailable("No API key".to_string());
        assert!(!status.is_ready());
        assert!(matches!(status, ProviderStatus::Unavailable(msg) if msg == "No API key"));
    }
}
