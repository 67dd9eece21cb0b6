mod embedder_factory;
mod ollama_embedder;
mod openai_embedder;

pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use ollama_embedder::OllamaEmbedder;
pub use openai_embedder::OpenAiEmbedder;
