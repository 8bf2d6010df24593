//! Chat assistant
//!
//! Stateless one-shot completion behind `/chat`; no planning involved.

use crate::llm::{ChatMessage, RoleBinding, RoleStatus};
use crate::Result;

/// Render the chat prompt, interpolating optional context
pub fn build_chat_prompt(message: &str, context: Option<&str>) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("None");

    format!(
        "You are a helpful pipeline assistant.\n\nContext:\n{}\n\nUser:\n{}",
        context, message
    )
}

/// Answers free-form questions about a pipeline run
pub struct ChatAssistant {
    binding: RoleBinding,
}

impl ChatAssistant {
    pub fn new(binding: RoleBinding) -> Self {
        Self { binding }
    }

    pub fn reply(&self, message: &str, context: Option<&str>) -> Result<String> {
        let prompt = build_chat_prompt(message, context);
        let reply = self.binding.complete(vec![ChatMessage::user(prompt)])?;
        Ok(reply)
    }

    /// Provider readiness for the chat role
    pub fn role_status(&self) -> RoleStatus {
        self.binding.status("chat")
    }
}
