use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::application::{ChatClient, GenerateTasksUseCase};
use crate::connector::{
    AnthropicClient, MockChatClient, OllamaClient, OpenAiClient, DEFAULT_ANTHROPIC_BASE_URL,
    DEFAULT_ANTHROPIC_MODEL, DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL,
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Values that mean "no OpenAI key was really provided".
const PLACEHOLDER_KEYS: &[&str] = &["your-api-key-here", "${OPENAI_API_KEY}"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderKind {
    /// OpenAI when a key is configured, otherwise the local Ollama model
    Auto,
    #[value(name = "openai")]
    OpenAi,
    Ollama,
    Anthropic,
    /// Canned offline replies
    Mock,
}

#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub provider: ProviderKind,
    /// In `auto` mode, skip OpenAI even when a key is present.
    pub use_local_llm: bool,
    pub temperature: f64,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_base_url: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Auto,
            use_local_llm: false,
            temperature: DEFAULT_TEMPERATURE,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            anthropic_api_key: None,
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
        }
    }
}

impl ContainerConfig {
    /// The concrete provider `auto` stands for under this configuration.
    pub fn resolved_provider(&self) -> ProviderKind {
        match self.provider {
            ProviderKind::Auto => {
                if self.use_local_llm {
                    ProviderKind::Ollama
                } else if is_openai_key_configured(self.openai_api_key.as_deref()) {
                    ProviderKind::OpenAi
                } else {
                    warn!("OpenAI key not configured. Using local LLM as fallback.");
                    ProviderKind::Ollama
                }
            }
            other => other,
        }
    }
}

pub fn is_openai_key_configured(key: Option<&str>) -> bool {
    match key.map(str::trim) {
        None => false,
        Some(k) => !k.is_empty() && !PLACEHOLDER_KEYS.contains(&k),
    }
}

/// Local compatible servers (LM Studio, proxies) accept requests without a key.
pub fn is_local_endpoint(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .is_some_and(|host| matches!(host.as_str(), "localhost" | "127.0.0.1" | "[::1]"))
}

/// Wires the selected [`ChatClient`] into the use cases. Built once at startup.
pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let chat_client: Arc<dyn ChatClient> = match config.resolved_provider() {
            ProviderKind::OpenAi => {
                let key = config.openai_api_key.as_deref().unwrap_or_default();
                if !is_openai_key_configured(Some(key)) {
                    bail!("OpenAI provider selected but no API key is configured (set OPENAI_API_KEY)");
                }
                Arc::new(OpenAiClient::new(
                    key.trim(),
                    &config.openai_model,
                    &config.openai_base_url,
                    config.temperature,
                ))
            }
            ProviderKind::Ollama => Arc::new(OllamaClient::new(
                &config.ollama_model,
                &config.ollama_base_url,
                config.temperature,
            )),
            ProviderKind::Anthropic => {
                let key = config
                    .anthropic_api_key
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default();
                if key.is_empty() && !is_local_endpoint(&config.anthropic_base_url) {
                    bail!(
                        "Anthropic provider selected but no API key is configured (set ANTHROPIC_API_KEY)"
                    );
                }
                Arc::new(AnthropicClient::new(
                    key,
                    &config.anthropic_model,
                    &config.anthropic_base_url,
                    config.temperature,
                ))
            }
            ProviderKind::Mock => Arc::new(MockChatClient::new("offline")),
            ProviderKind::Auto => unreachable!("resolved_provider never returns Auto"),
        };

        info!("LLM provider: {}", chat_client.describe());

        Ok(Self {
            chat_client,
            config,
        })
    }

    /// Use an already-built client, bypassing provider selection.
    pub fn with_chat_client(chat_client: Arc<dyn ChatClient>, config: ContainerConfig) -> Self {
        Self {
            chat_client,
            config,
        }
    }

    pub fn generate_tasks_use_case(&self) -> GenerateTasksUseCase {
        GenerateTasksUseCase::new(self.chat_client.clone())
    }

    pub fn provider_label(&self) -> String {
        self.chat_client.describe()
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }
}
