use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider_http::{endpoint, http_client, read_json};
use crate::application::ChatClient;
use crate::domain::DomainError;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-haiku-4-5";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// HTTP client for the Anthropic Messages API, or any compatible endpoint
/// such as LM Studio (`ANTHROPIC_BASE_URL=http://localhost:1234`).
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f64,
    /// Full endpoint URL (base + MESSAGES_PATH).
    url: String,
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl AsRef<str>,
        temperature: f64,
    ) -> Self {
        Self {
            client: http_client(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
            url: endpoint(base_url.as_ref(), MESSAGES_PATH),
        }
    }
}

#[async_trait]
impl ChatClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: self.temperature,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        let sent = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request)
            .send()
            .await;
        let api_response: ApiResponse = read_json("AnthropicClient", sent).await?;

        // Thinking and tool blocks carry no text; take the first one that does.
        Ok(api_response
            .content
            .into_iter()
            .find_map(|b| b.text)
            .unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("Anthropic ({})", self.model)
    }
}
