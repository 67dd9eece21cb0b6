use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{PageReader, PageReaderError, VectorStore, VectorStoreError};
use crate::application::services::chunk_extractor::ChunkExtractor;

/// Extracts a document and writes its chunks to the vector store in
/// sequential batches. Each batch must be confirmed before the next is
/// sent, so a mid-run failure leaves a well-defined prefix committed.
pub struct IngestionService<P, V>
where
    P: PageReader,
    V: VectorStore,
{
    extractor: ChunkExtractor<P>,
    vector_store: Arc<V>,
    batch_size: usize,
}

impl<P, V> IngestionService<P, V>
where
    P: PageReader,
    V: VectorStore,
{
    pub fn new(extractor: ChunkExtractor<P>, vector_store: Arc<V>, batch_size: usize) -> Self {
        Self {
            extractor,
            vector_store,
            batch_size: batch_size.max(1),
        }
    }

    /// Ensures the collection exists, recreating it from scratch when
    /// `rebuild` is set.
    pub async fn prepare_collection(&self, rebuild: bool) -> Result<(), IngestionError> {
        if rebuild {
            self.vector_store.delete_collection().await?;
        }

        if rebuild || !self.vector_store.exists().await? {
            self.vector_store.create_collection().await?;
        }

        Ok(())
    }

    /// Returns the number of chunks written. A failed document surfaces
    /// its error; the caller decides skip-vs-abort across documents.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn ingest_document(
        &self,
        path: &Path,
        book_name: &str,
    ) -> Result<usize, IngestionError> {
        let chunks = self.extractor.extract(path, book_name).await?;

        for (batch_number, batch) in chunks.chunks(self.batch_size).enumerate() {
            self.vector_store.upsert(batch).await?;
            tracing::info!(
                batch_number,
                batch_len = batch.len(),
                "batch committed"
            );
        }

        Ok(chunks.len())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("extraction: {0}")]
    Extraction(#[from] PageReaderError),
    #[error("storage: {0}")]
    Storage(#[from] VectorStoreError),
}
