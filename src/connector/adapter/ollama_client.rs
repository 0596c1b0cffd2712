use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider_http::{endpoint, http_client, read_json};
use crate::application::ChatClient;
use crate::domain::DomainError;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";
const CHAT_PATH: &str = "/api/chat";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    stream: bool,
    options: ApiOptions,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ApiOptions {
    temperature: f64,
}

#[derive(Deserialize)]
struct ApiResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Client for a locally hosted Ollama server (non-streaming `/api/chat`).
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    temperature: f64,
    base_url: String,
    url: String,
}

impl OllamaClient {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>, temperature: f64) -> Self {
        let base_url: String = base_url.into();
        let url = endpoint(&base_url, CHAT_PATH);
        Self {
            client: http_client(),
            model: model.into(),
            temperature,
            base_url: base_url.trim_end_matches('/').to_string(),
            url,
        }
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: ApiOptions {
                temperature: self.temperature,
            },
        };

        let sent = self.client.post(&self.url).json(&request).send().await;
        let api_response: ApiResponse = read_json("OllamaClient", sent).await?;

        Ok(api_response.message.content)
    }

    fn describe(&self) -> String {
        format!("Ollama ({}) - {}", self.model, self.base_url)
    }
}
