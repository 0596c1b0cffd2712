use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_MAX_TASKS: u32 = 10;
pub const MIN_OBJECTIVE_CHARS: usize = 10;
pub const MAX_OBJECTIVE_CHARS: usize = 1000;

/// How verbose the generated task descriptions should be. Advisory only: the
/// value is forwarded to the model and never enforced.
///
/// Unknown levels are kept verbatim in [`DetailLevel::Other`] so they reach the
/// prompt unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DetailLevel {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl DetailLevel {
    pub fn as_str(&self) -> &str {
        match self {
            DetailLevel::Low => "low",
            DetailLevel::Medium => "medium",
            DetailLevel::High => "high",
            DetailLevel::Other(s) => s,
        }
    }
}

impl From<&str> for DetailLevel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => DetailLevel::Low,
            "medium" => DetailLevel::Medium,
            "high" => DetailLevel::High,
            _ => DetailLevel::Other(s.to_string()),
        }
    }
}

impl From<String> for DetailLevel {
    fn from(s: String) -> Self {
        DetailLevel::from(s.as_str())
    }
}

impl From<DetailLevel> for String {
    fn from(level: DetailLevel) -> Self {
        level.as_str().to_string()
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to break an objective down into tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    objective: String,
    max_tasks: u32,
    detail_level: DetailLevel,
}

impl GenerationRequest {
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            max_tasks: DEFAULT_MAX_TASKS,
            detail_level: DetailLevel::default(),
        }
    }

    /// Advisory cap passed to the model. The parser does not truncate.
    pub fn with_max_tasks(mut self, max_tasks: u32) -> Self {
        self.max_tasks = max_tasks;
        self
    }

    pub fn with_detail_level(mut self, detail_level: impl Into<DetailLevel>) -> Self {
        self.detail_level = detail_level.into();
        self
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn max_tasks(&self) -> u32 {
        self.max_tasks
    }

    pub fn detail_level(&self) -> &DetailLevel {
        &self.detail_level
    }

    /// Check the request before any prompt is built.
    ///
    /// Collects every violation so callers can report all fields at once.
    /// The detail level is never rejected.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut details = BTreeMap::new();

        let chars = self.objective.chars().count();
        if self.objective.trim().is_empty() {
            details.insert(
                "objective".to_string(),
                "The objective cannot be empty".to_string(),
            );
        } else if !(MIN_OBJECTIVE_CHARS..=MAX_OBJECTIVE_CHARS).contains(&chars) {
            details.insert(
                "objective".to_string(),
                format!(
                    "The objective must be between {} and {} characters",
                    MIN_OBJECTIVE_CHARS, MAX_OBJECTIVE_CHARS
                ),
            );
        }

        if self.max_tasks == 0 {
            details.insert(
                "maxTasks".to_string(),
                "The maximum number of tasks must be positive".to_string(),
            );
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(details))
        }
    }
}
