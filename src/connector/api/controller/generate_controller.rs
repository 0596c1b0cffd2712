use anyhow::Result;

use crate::domain::{GenerationRequest, GenerationResult};

use super::super::Container;

pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run one generation and render it as pretty JSON, or as a short text
    /// summary when `summary` is set.
    pub async fn generate(
        &self,
        objective: String,
        max_tasks: u32,
        detail_level: String,
        summary: bool,
    ) -> Result<String> {
        let request = Self::request(objective, max_tasks, detail_level);
        let use_case = self.container.generate_tasks_use_case();
        let result = use_case.execute(&request).await?;

        if summary {
            Ok(self.format_summary(&result))
        } else {
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }

    /// The prompt that `generate` would send, without calling the provider.
    pub fn prompt(&self, objective: String, max_tasks: u32, detail_level: String) -> Result<String> {
        let request = Self::request(objective, max_tasks, detail_level);
        let use_case = self.container.generate_tasks_use_case();
        Ok(use_case.render_prompt(&request)?)
    }

    fn request(objective: String, max_tasks: u32, detail_level: String) -> GenerationRequest {
        GenerationRequest::new(objective)
            .with_max_tasks(max_tasks)
            .with_detail_level(detail_level)
    }

    fn format_summary(&self, result: &GenerationResult) -> String {
        let mut output = format!(
            "Objective: {}\nModel: {}\nGenerated: {}\n\n",
            result.original_objective(),
            result.model(),
            result.generated_at().to_rfc3339()
        );

        for task in result.tasks() {
            output.push_str(&format!(
                "{}. {} [{}, {}h]\n",
                task.order(),
                task.title(),
                task.priority(),
                task.estimated_hours()
            ));
            if task.has_dependencies() {
                output.push_str(&format!("   Depends on: {}\n", task.dependencies().join(", ")));
            }
            for line in task.description().lines() {
                output.push_str(&format!("   | {}\n", line));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "Total: {} tasks, {} hours\n",
            result.tasks().len(),
            result.total_estimated_hours()
        ));
        output
    }
}
