use async_trait::async_trait;

use crate::domain::DomainError;

/// Sends a prompt to an LLM and returns its text reply.
///
/// Implementors encapsulate transport, credentials and vendor-specific API
/// details. The provider is chosen once at startup; callers only see this trait.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `prompt` as a single user message and return the completion text.
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;

    /// Human-readable provider/model label, e.g. `OpenAI (gpt-3.5-turbo)`.
    fn describe(&self) -> String;
}
