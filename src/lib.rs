pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

#[cfg(test)]
mod test_support;

pub use application::{ChatClient, GenerateTasksUseCase};

pub use cli::{Cli, Commands};

pub use connector::api::{Container, ContainerConfig, ProviderKind};
pub use connector::{AnthropicClient, MockChatClient, OllamaClient, OpenAiClient};

pub use domain::{
    parse_dependencies, DetailLevel, DomainError, GenerationRequest, GenerationResult,
    PromptBuilder, ResponseParser, Task,
};
