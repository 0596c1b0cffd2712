//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - LLM providers (OpenAI, Ollama, Anthropic, mock)
//! - HTTP API (axum router, controllers, DI container)

pub mod adapter;
pub mod api;

pub use adapter::*;
