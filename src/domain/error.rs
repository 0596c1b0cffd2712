use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Rejected request. `details` maps each offending field to its message.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        details: BTreeMap<String, String>,
    },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
            details: BTreeMap::new(),
        }
    }

    /// Build a validation error from per-field messages. The first message
    /// (in field order) becomes the summary.
    pub fn validation(details: BTreeMap<String, String>) -> Self {
        let message = details
            .values()
            .next()
            .cloned()
            .unwrap_or_else(|| "Validation failed".to_string());
        Self::InvalidInput { message, details }
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub fn is_llm_error(&self) -> bool {
        matches!(self, Self::Llm(_))
    }
}
