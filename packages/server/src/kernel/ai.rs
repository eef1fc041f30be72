// Completion service implementation backed by openai-client
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};

use super::BaseAI;

/// BaseAI over any OpenAI-compatible endpoint (OpenAI, Ollama `/v1`).
#[derive(Clone)]
pub struct OpenAiCompletion {
    client: OpenAIClient,
    model: String,
}

impl OpenAiCompletion {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseAI for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Sampling settings used for generated tweet copy.
        let request = ChatRequest::new(&self.model)
            .message(Message::user(prompt))
            .temperature(0.7)
            .top_p(0.7)
            .max_tokens(300);

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(anyhow::Error::new)?;

        Ok(response.content)
    }

    async fn complete_json(&self, prompt: &str) -> Result<String> {
        self.client
            .json_completion(&self.model, prompt)
            .await
            .map_err(anyhow::Error::new)
    }
}
