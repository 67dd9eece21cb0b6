mod embedder;
mod llm_factory;
mod ollama_client;
mod openai_client;

pub use embedder::{EmbedderFactory, EmbedderFactoryError, OllamaEmbedder, OpenAiEmbedder};
pub use llm_factory::{LlmClientFactory, LlmFactoryError};
pub use ollama_client::OllamaClient;
pub use openai_client::OpenAiClient;
