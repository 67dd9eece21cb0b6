use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::{Deserialize, Deserializer};

use super::environment::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub qdrant: QdrantSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub ingestion: IngestionSettings,
    pub embeddings: EmbeddingsSettings,
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QdrantSettings {
    pub url: String,
    pub collection_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    /// Primary cosine-distance cutoff; `off`/`none`/`disable` turns the
    /// tier off and every hit passes with high confidence.
    #[serde(deserialize_with = "deserialize_threshold")]
    pub similarity_threshold: Option<f32>,
    /// Secondary cutoff consulted only when nothing passes the primary
    /// tier; hits admitted here are flagged low confidence.
    #[serde(deserialize_with = "deserialize_threshold")]
    pub fallback_threshold: Option<f32>,
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestionSettings {
    pub batch_size: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Ollama,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: u64,
    pub api_key: Option<String>,
    pub ollama_base_url: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Ollama,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub ollama_base_url: String,
}

impl Settings {
    /// Layered load: built-in defaults, then an optional
    /// `appsettings.{environment}` file, then `APP__`-prefixed
    /// environment variables (e.g. `APP__RETRIEVAL__SIMILARITY_THRESHOLD`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("qdrant.url", "http://localhost:6334")?
            .set_default("qdrant.collection_name", "textbook_chunks")?
            .set_default("chunking.chunk_size", 1000)?
            .set_default("chunking.chunk_overlap", 200)?
            .set_default("retrieval.similarity_threshold", 0.6)?
            .set_default("retrieval.fallback_threshold", 0.65)?
            .set_default("retrieval.top_k", 5)?
            .set_default("ingestion.batch_size", 100)?
            .set_default("embeddings.provider", "openai")?
            .set_default("embeddings.model", "text-embedding-3-small")?
            .set_default("embeddings.dimension", 1536)?
            .set_default("embeddings.ollama_base_url", "http://localhost:11434")?
            .set_default("llm.provider", "openai")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.ollama_base_url", "http://localhost:11434")?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

/// Accepts a number, a numeric string, or one of the disable tokens
/// `off`/`none`/`disable` (case-insensitive), which map to `None`.
fn deserialize_threshold<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(Some(value as f32)),
        Raw::Text(value) => {
            let token = value.trim().to_lowercase();
            if matches!(token.as_str(), "off" | "none" | "disable") {
                return Ok(None);
            }
            token
                .parse::<f32>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid threshold: {value}")))
        }
    }
}
