use clap::{Parser, Subcommand};

use crate::connector::api::{ContainerConfig, ProviderKind, DEFAULT_TEMPERATURE};
use crate::connector::{
    DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL, DEFAULT_OLLAMA_BASE_URL,
    DEFAULT_OLLAMA_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
use crate::domain::DEFAULT_MAX_TASKS;

#[derive(Parser)]
#[command(name = "taskgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// LLM provider to use
    #[arg(long, global = true, env = "TASKGEN_PROVIDER", value_enum, default_value = "auto")]
    pub provider: ProviderKind,

    /// Prefer the local Ollama model in auto mode even when an OpenAI key is set
    #[arg(long, global = true, env = "TASKGEN_USE_LOCAL_LLM")]
    pub use_local_llm: bool,

    #[arg(long, global = true, env = "TASKGEN_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, global = true, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    pub openai_model: String,

    #[arg(long, global = true, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, global = true, env = "OLLAMA_BASE_URL", default_value = DEFAULT_OLLAMA_BASE_URL)]
    pub ollama_base_url: String,

    #[arg(long, global = true, env = "OLLAMA_MODEL", default_value = DEFAULT_OLLAMA_MODEL)]
    pub ollama_model: String,

    #[arg(long, global = true, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    #[arg(long, global = true, env = "ANTHROPIC_MODEL", default_value = DEFAULT_ANTHROPIC_MODEL)]
    pub anthropic_model: String,

    #[arg(long, global = true, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_ANTHROPIC_BASE_URL)]
    pub anthropic_base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            provider: self.provider,
            use_local_llm: self.use_local_llm,
            temperature: self.temperature,
            openai_api_key: self.openai_api_key.clone(),
            openai_model: self.openai_model.clone(),
            openai_base_url: self.openai_base_url.clone(),
            ollama_base_url: self.ollama_base_url.clone(),
            ollama_model: self.ollama_model.clone(),
            anthropic_api_key: self.anthropic_api_key.clone(),
            anthropic_model: self.anthropic_model.clone(),
            anthropic_base_url: self.anthropic_base_url.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        #[arg(long, env = "TASKGEN_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, env = "TASKGEN_PORT", default_value_t = 8080)]
        port: u16,
    },

    /// Generate tasks for an objective and print them
    Generate {
        objective: String,

        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_TASKS)]
        max_tasks: u32,

        /// low, medium or high; other values are passed to the model as-is
        #[arg(short, long, default_value = "medium")]
        detail_level: String,

        /// Print a readable summary instead of JSON
        #[arg(short, long)]
        summary: bool,
    },

    /// Print the prompt that would be sent, without calling a provider
    Prompt {
        objective: String,

        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_TASKS)]
        max_tasks: u32,

        #[arg(short, long, default_value = "medium")]
        detail_level: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["taskgen", "generate", "Develop an e-commerce website"])
            .unwrap();
        match cli.command {
            Commands::Generate {
                objective,
                max_tasks,
                detail_level,
                summary,
            } => {
                assert_eq!(objective, "Develop an e-commerce website");
                assert_eq!(max_tasks, 10);
                assert_eq!(detail_level, "medium");
                assert!(!summary);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn provider_flag_accepts_openai() {
        let cli = Cli::try_parse_from(["taskgen", "--provider", "openai", "prompt", "Plan a trip abroad"])
            .unwrap();
        assert_eq!(cli.provider, ProviderKind::OpenAi);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "taskgen",
            "serve",
            "--port",
            "9000",
            "--provider",
            "mock",
            "--ollama-model",
            "mistral",
        ])
        .unwrap();
        assert_eq!(cli.provider, ProviderKind::Mock);
        let config = cli.container_config();
        assert_eq!(config.ollama_model, "mistral");
        assert!(matches!(cli.command, Commands::Serve { port: 9000, .. }));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let res = Cli::try_parse_from(["taskgen", "--provider", "bard", "serve"]);
        assert!(res.is_err());
    }
}
