use std::sync::Arc;

use crate::{
    constants::judge_prompt::NO_RESPONSE_TEXT,
    errors::GenerationError,
    services::generative_backend::{GenerateRequest, GenerativeBackend},
};

/// Free-form chat completion against the generation backend.
pub struct CompletionService {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
    thinking_budget: u32,
}

impl CompletionService {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>, thinking_budget: u32) -> Self {
        Self {
            backend,
            model: model.into(),
            thinking_budget,
        }
    }

    /// Sends `prompt` and returns the model's text.
    ///
    /// Never fails: a missing answer becomes [`NO_RESPONSE_TEXT`] and a failed
    /// call becomes `"Error: <message>"`.
    pub async fn complete(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        extended_reasoning: bool,
    ) -> String {
        match self.try_complete(prompt, system_instruction, extended_reasoning).await {
            Ok(text) => text,
            Err(e) => format!("Error: {}", e),
        }
    }

    /// Same call as [`complete`](Self::complete) but keeps transport and
    /// backend failures distinguishable from answer text.
    pub async fn try_complete(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        extended_reasoning: bool,
    ) -> Result<String, GenerationError> {
        let mut request = GenerateRequest::new(self.model.clone(), prompt);

        if let Some(instruction) = system_instruction.filter(|s| !s.trim().is_empty()) {
            request = request.with_system_instruction(instruction);
        }
        if extended_reasoning {
            request = request.with_thinking_budget(self.thinking_budget);
        }

        match self.backend.generate(request).await {
            Ok(Some(text)) => Ok(text),
            Ok(None) => {
                log::warn!("Model returned no text for completion request");
                Ok(NO_RESPONSE_TEXT.to_string())
            }
            Err(e) => {
                log::error!("Completion request failed: {}", e);
                Err(e)
            }
        }
    }
}
