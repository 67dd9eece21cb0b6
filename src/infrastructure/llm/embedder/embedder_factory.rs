use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

use super::ollama_embedder::OllamaEmbedder;
use super::openai_embedder::OpenAiEmbedder;

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("missing API key: the OpenAI embedder requires an api_key")]
    MissingApiKey,
}

impl EmbedderFactory {
    pub fn create(settings: &EmbeddingsSettings) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match settings.provider {
            EmbeddingProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or(EmbedderFactoryError::MissingApiKey)?;
                tracing::info!(model = %settings.model, "Using OpenAI embeddings");
                Ok(Arc::new(OpenAiEmbedder::new(key, settings.model.clone())))
            }
            EmbeddingProvider::Ollama => {
                tracing::info!(
                    model = %settings.model,
                    base_url = %settings.ollama_base_url,
                    "Using Ollama embeddings"
                );
                Ok(Arc::new(OllamaEmbedder::new(
                    settings.ollama_base_url.clone(),
                    settings.model.clone(),
                )))
            }
        }
    }
}
