use async_trait::async_trait;

use super::embedder::EmbedderError;
use super::search_hit::SearchHit;
use crate::domain::Chunk;

/// Vector index collaborator. Implementations embed query and chunk text
/// internally; callers never handle raw vectors.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn create_collection(&self) -> Result<(), VectorStoreError>;

    async fn exists(&self) -> Result<bool, VectorStoreError>;

    async fn delete_collection(&self) -> Result<(), VectorStoreError>;

    async fn upsert(&self, chunks: &[Chunk]) -> Result<(), VectorStoreError>;

    /// Top-`k` chunks by ascending cosine distance to `query`.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, VectorStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("collection creation failed: {0}")]
    CollectionCreationFailed(String),
    #[error("collection deletion failed: {0}")]
    CollectionDeletionFailed(String),
    #[error("upsert failed: {0}")]
    UpsertFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
}
