use crate::domain::GenerationRequest;

/// Renders a [`GenerationRequest`] into the prompt sent to the model.
///
/// The block format requested here (`TASK <n>:` followed by `Title:`,
/// `Description:`, `Priority:`, `Estimate:` and `Dependencies:`) is what
/// [`super::ResponseParser`] matches. Change both together.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Pure function of the request. Values are inserted verbatim and never
    /// re-scanned, so braces inside the objective are left alone.
    pub fn render(&self, request: &GenerationRequest) -> String {
        format!(
            "You are an assistant specialized in project planning and organization.

Provided objective: {objective}

Please break down this objective into a structured task list.

Rules:
- Generate a maximum of {max_tasks} tasks
- Detail level: {detail_level}
- Each task must have: order, title, description, priority (high/medium/low), estimated hours
- Identify dependencies between tasks when applicable

Expected response format (use exactly this format, one blank line between tasks):

TASK 1:
Title: [task title]
Description: [detailed description]
Priority: [high/medium/low]
Estimate: [number] hours
Dependencies: [comma-separated task numbers or \"none\"]

TASK 2:
...

Be specific, practical and organize the tasks logically.
",
            objective = request.objective(),
            max_tasks = request.max_tasks(),
            detail_level = request.detail_level(),
        )
    }
}
