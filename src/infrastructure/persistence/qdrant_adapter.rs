use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder, VectorsConfig,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{Embedder, SearchHit, VectorStore, VectorStoreError};
use crate::domain::{BoundingBox, Chunk};

/// Qdrant-backed vector index. Embeds chunk and query text through the
/// injected `Embedder`, so callers only ever see text and distance
/// scores. Qdrant reports cosine similarity (higher = closer); scores
/// are converted to cosine distance (`1.0 - similarity`) on the way out
/// so the rest of the pipeline keeps its lower-is-better convention.
pub struct QdrantAdapter {
    client: Arc<Qdrant>,
    collection_name: String,
    embedder: Arc<dyn Embedder>,
    vector_dimensions: u64,
}

impl QdrantAdapter {
    pub async fn new(
        url: &str,
        collection_name: String,
        embedder: Arc<dyn Embedder>,
        vector_dimensions: u64,
    ) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            collection_name,
            embedder,
            vector_dimensions,
        })
    }

    fn chunk_payload(chunk: &Chunk) -> Result<Payload, VectorStoreError> {
        let payload = json!({
            "text": chunk.text,
            "book_name": chunk.book_name,
            "source": chunk.source,
            "page": chunk.page,
            "chunk_index": chunk.chunk_index,
            "page_width": chunk.page_width,
            "page_height": chunk.page_height,
            "x1": chunk.bbox.map(|b| b.x1),
            "y1": chunk.bbox.map(|b| b.y1),
            "x2": chunk.bbox.map(|b| b.x2),
            "y2": chunk.bbox.map(|b| b.y2),
        });

        Payload::try_from(payload).map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))
    }

    fn chunk_from_payload(
        payload: &std::collections::HashMap<String, qdrant_client::qdrant::Value>,
    ) -> Option<Chunk> {
        let text = payload.get("text")?.as_str()?.to_string();
        let book_name = payload.get("book_name")?.as_str()?.to_string();
        let source = payload.get("source")?.as_str()?.to_string();
        let page = payload.get("page")?.as_integer()? as u32;
        let chunk_index = payload.get("chunk_index")?.as_integer()? as u32;
        let page_width = payload.get("page_width")?.as_double()? as f32;
        let page_height = payload.get("page_height")?.as_double()? as f32;

        let coordinate = |field: &str| {
            payload
                .get(field)
                .and_then(|v| v.as_double())
                .map(|v| v as f32)
        };
        let bbox = match (
            coordinate("x1"),
            coordinate("y1"),
            coordinate("x2"),
            coordinate("y2"),
        ) {
            (Some(x1), Some(y1), Some(x2), Some(y2)) => BoundingBox::new(x1, y1, x2, y2),
            _ => None,
        };

        Some(Chunk {
            text,
            book_name,
            source,
            page,
            chunk_index,
            bbox,
            page_width,
            page_height,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn create_collection(&self) -> Result<(), VectorStoreError> {
        if self.exists().await? {
            info!(collection = %self.collection_name, "collection already exists");
            return Ok(());
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            self.vector_dimensions,
            Distance::Cosine,
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "collection created");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn exists(&self) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        if !self.exists().await? {
            return Ok(());
        }

        self.client
            .delete_collection(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::CollectionDeletionFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "collection deleted");
        Ok(())
    }

    #[instrument(skip(self, chunks), fields(collection = %self.collection_name, count = chunks.len()))]
    async fn upsert(&self, chunks: &[Chunk]) -> Result<(), VectorStoreError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut points = Vec::with_capacity(chunks.len());
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            points.push(PointStruct::new(
                Uuid::new_v4().to_string(),
                embedding.values,
                Self::chunk_payload(chunk)?,
            ));
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %self.collection_name, count = chunks.len(), "points upserted");
        Ok(())
    }

    #[instrument(skip(self, query), fields(collection = %self.collection_name, k))]
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, VectorStoreError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection_name,
                    query_embedding.values,
                    k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        let mut hits: Vec<SearchHit> = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let chunk = Self::chunk_from_payload(&point.payload)?;
                Some(SearchHit {
                    chunk,
                    score: 1.0 - point.score,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        Ok(hits)
    }
}
