//! LLM integration module
//!
//! One blocking completion per call, behind the [`CompletionProvider`] trait.
//!
//! Supported providers:
//! - OpenAI-compatible APIs (OpenAI, Cerebras)
//! - Gemini (Google AI)
//! - Ollama (local inference)

mod error;
mod gemini;
mod message;
mod ollama;
mod openai;
mod provider;
mod registry;

pub use error::LlmError;
pub use message::{ChatMessage, CompletionRequest, Role};
pub use provider::{CompletionProvider, ProviderStatus, SharedProvider};
pub use registry::{ProviderRegistry, RoleBinding, RoleStatus};

// Provider implementations
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiCompatProvider;
