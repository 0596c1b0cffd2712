use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, GenerationRequest};

/// Request for generating a structured task list from an objective.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskGenerationRequest {
    /// The main objective to be broken down into tasks (10 to 1000 characters)
    #[serde(default)]
    pub objective: String,

    /// Maximum number of tasks to generate (default 10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tasks: Option<i64>,

    /// Level of detail for each task: low, medium or high (default medium)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_level: Option<String>,
}

impl TaskGenerationRequest {
    /// Apply defaults and validate.
    pub fn into_domain(self) -> Result<GenerationRequest, DomainError> {
        let mut request = GenerationRequest::new(self.objective);
        let mut too_large = false;
        if let Some(max_tasks) = self.max_tasks {
            // Non-positive values become 0 so validation reports them.
            match u32::try_from(max_tasks.max(0)) {
                Ok(max_tasks) => request = request.with_max_tasks(max_tasks),
                Err(_) => too_large = true,
            }
        }
        if let Some(detail_level) = self.detail_level {
            request = request.with_detail_level(detail_level);
        }

        let validated = request.validate();
        if !too_large {
            return validated.map(|()| request);
        }

        let mut details = match validated {
            Ok(()) => BTreeMap::new(),
            Err(DomainError::InvalidInput { details, .. }) => details,
            Err(other) => return Err(other),
        };
        details.insert(
            "maxTasks".to_string(),
            format!("The maximum number of tasks must be at most {}", u32::MAX),
        );
        Err(DomainError::validation(details))
    }
}

/// Body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,

    /// HTTP status code
    pub status: u16,

    /// HTTP reason phrase, e.g. "Bad Request"
    pub error: String,

    pub message: String,

    /// Per-field validation messages
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}
