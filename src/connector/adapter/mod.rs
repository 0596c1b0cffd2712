mod anthropic_client;
mod mock_chat_client;
mod ollama_client;
mod openai_client;
mod provider_http;

pub use anthropic_client::*;
pub use mock_chat_client::*;
pub use ollama_client::*;
pub use openai_client::*;
