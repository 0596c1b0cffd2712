use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const FALLBACK_TITLE: &str = "Generated Tasks";
pub const FALLBACK_PRIORITY: &str = "medium";

/// One actionable step extracted from the model's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Sequence number as written by the model (not renumbered)
    order: u32,

    /// Short task title
    title: String,

    /// Detailed description; may span several lines
    description: String,

    /// Lower-cased priority, usually one of high, medium, low
    priority: String,

    /// Estimated effort in whole hours
    estimated_hours: u32,

    /// Order numbers of prerequisite tasks, as free-text tokens
    dependencies: Vec<String>,
}

impl Task {
    pub fn new(
        order: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
        estimated_hours: u32,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            order,
            title: title.into(),
            description: description.into(),
            priority: priority.into(),
            estimated_hours,
            dependencies,
        }
    }

    /// The single task returned when a reply contains no parseable blocks.
    /// The whole reply becomes the description, untouched.
    pub fn fallback(raw: impl Into<String>) -> Self {
        Self::new(1, FALLBACK_TITLE, raw, FALLBACK_PRIORITY, 0, Vec::new())
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }

    pub fn estimated_hours(&self) -> u32 {
        self.estimated_hours
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}
