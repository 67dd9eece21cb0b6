mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, EmbeddingProvider, EmbeddingsSettings, IngestionSettings, LlmProvider,
    LlmSettings, QdrantSettings, RetrievalSettings, ServerSettings, Settings,
};
