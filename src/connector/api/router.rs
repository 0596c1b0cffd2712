use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::GenerateController;

/// Dispatches one-shot CLI commands to their controllers.
pub struct Router<'a> {
    generate_controller: GenerateController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            generate_controller: GenerateController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Generate {
                objective,
                max_tasks,
                detail_level,
                summary,
            } => {
                self.generate_controller
                    .generate(objective, max_tasks, detail_level, summary)
                    .await
            }
            Commands::Prompt {
                objective,
                max_tasks,
                detail_level,
            } => self
                .generate_controller
                .prompt(objective, max_tasks, detail_level),
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
