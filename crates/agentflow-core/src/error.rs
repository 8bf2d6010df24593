//! Error types for agentflow core
//!
//! Provides a unified error type for the operations exposed to callers.

use crate::config::ConfigError;
use crate::llm::LlmError;
use thiserror::Error;

/// Result type for agentflow core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for agentflow core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_errors_convert() {
        let err: Error = ConfigError::EmptyCatalog.into();
        assert_eq!(err.to_string(), "Configuration error: Agent catalog is empty");

        let err: Error = LlmError::Timeout.into();
        assert!(matches!(err, Error::Llm(LlmError::Timeout)));
    }
}
