use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::DomainError;

/// Reply used when no canned reply is given. Well-formed, two tasks.
pub const DEFAULT_MOCK_REPLY: &str = "TASK 1:
Title: Define scope
Description: Gather requirements and agree on the goals of the objective.
Priority: high
Estimate: 4 hours
Dependencies: none

TASK 2:
Title: Build prototype
Description: Implement a first working version and review it.
Priority: medium
Estimate: 20 hours
Dependencies: 1
";

/// Offline [`ChatClient`] returning a fixed reply.
///
/// Every prompt it receives is recorded and can be read back with
/// [`MockChatClient::prompts`].
pub struct MockChatClient {
    name: String,
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockChatClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_reply(name, DEFAULT_MOCK_REPLY)
    }

    pub fn with_reply(name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails with [`DomainError::Llm`].
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        debug!("MockChatClient received prompt ({} chars)", prompt.len());
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone().map_err(DomainError::llm)
    }

    fn describe(&self) -> String {
        format!("Mock ({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_prompts_and_returns_reply() {
        let client = MockChatClient::with_reply("demo", "hello");
        assert_eq!(client.complete("first").await.unwrap(), "hello");
        assert_eq!(client.complete("second").await.unwrap(), "hello");
        assert_eq!(client.prompts(), vec!["first", "second"]);
        assert_eq!(client.describe(), "Mock (demo)");
    }

    #[tokio::test]
    async fn failing_client_returns_llm_error() {
        let client = MockChatClient::failing("demo", "boom");
        let err = client.complete("prompt").await.unwrap_err();
        assert!(err.is_llm_error());
        assert_eq!(client.prompts().len(), 1);
    }
}
