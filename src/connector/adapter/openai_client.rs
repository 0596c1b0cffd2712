use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider_http::{endpoint, http_client, read_json};
use crate::application::ChatClient;
use crate::domain::DomainError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
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
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the OpenAI Chat Completions API.
///
/// Also works with OpenAI-compatible servers by pointing `base_url` at them.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f64,
    url: String,
}

impl OpenAiClient {
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
            url: endpoint(base_url.as_ref(), CHAT_COMPLETIONS_PATH),
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        let sent = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await;
        let api_response: ApiResponse = read_json("OpenAiClient", sent).await?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::llm("OpenAiClient: no choices in response"))?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("OpenAI ({})", self.model)
    }
}
