use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{DomainError, GenerationRequest, GenerationResult, PromptBuilder, ResponseParser};

/// Objective in, structured task list out.
///
/// Validates the request, renders the prompt, makes exactly one call to the
/// configured [`ChatClient`], parses the reply and stamps the result with the
/// generation time and the provider label.
pub struct GenerateTasksUseCase {
    chat_client: Arc<dyn ChatClient>,
    prompt_builder: PromptBuilder,
    response_parser: ResponseParser,
}

impl GenerateTasksUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            prompt_builder: PromptBuilder::new(),
            response_parser: ResponseParser::new(),
        }
    }

    /// The prompt that [`Self::execute`] would send, without calling the model.
    pub fn render_prompt(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        request.validate()?;
        Ok(self.prompt_builder.render(request))
    }

    pub async fn execute(&self, request: &GenerationRequest) -> Result<GenerationResult, DomainError> {
        info!("Generating tasks for objective: {}", request.objective());

        let prompt = self.render_prompt(request)?;

        let start_time = Instant::now();
        let reply = self.chat_client.complete(&prompt).await?;
        debug!(
            "LLM response ({} chars, {:?}): {}",
            reply.len(),
            start_time.elapsed(),
            reply
        );

        let tasks = self.response_parser.parse(&reply);
        info!("Generated {} tasks", tasks.len());

        Ok(GenerationResult::new(
            request.objective(),
            tasks,
            Utc::now(),
            self.chat_client.describe(),
        ))
    }
}
