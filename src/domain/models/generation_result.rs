use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Task;

/// The structured answer handed back to the caller for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// The objective exactly as submitted
    original_objective: String,

    /// Tasks in the order they appeared in the model's reply
    tasks: Vec<Task>,

    /// When the tasks were generated (UTC, ISO-8601)
    generated_at: DateTime<Utc>,

    /// Provider and model that produced the reply
    model: String,
}

impl GenerationResult {
    pub fn new(
        original_objective: impl Into<String>,
        tasks: Vec<Task>,
        generated_at: DateTime<Utc>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            original_objective: original_objective.into(),
            tasks,
            generated_at,
            model: model.into(),
        }
    }

    pub fn original_objective(&self) -> &str {
        &self.original_objective
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn total_estimated_hours(&self) -> u64 {
        self.tasks.iter().map(|t| t.estimated_hours() as u64).sum()
    }
}
