use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::ollama_client::OllamaClient;
use super::openai_client::OpenAiClient;

pub struct LlmClientFactory;

#[derive(Debug, thiserror::Error)]
pub enum LlmFactoryError {
    #[error("missing API key: the OpenAI chat client requires an api_key")]
    MissingApiKey,
}

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmFactoryError> {
        match settings.provider {
            LlmProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or(LlmFactoryError::MissingApiKey)?;
                tracing::info!(model = %settings.model, "Using OpenAI chat completions");
                Ok(Arc::new(OpenAiClient::new(key, settings.model.clone())))
            }
            LlmProvider::Ollama => {
                tracing::info!(
                    model = %settings.model,
                    base_url = %settings.ollama_base_url,
                    "Using Ollama generation"
                );
                Ok(Arc::new(OllamaClient::new(
                    settings.ollama_base_url.clone(),
                    settings.model.clone(),
                )))
            }
        }
    }
}
