use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use akashic::application::ports::{
    PageReader, PageReaderError, SearchHit, VectorStore, VectorStoreError,
};
use akashic::application::services::{ChunkExtractor, IngestionError, IngestionService};
use akashic::domain::{Chunk, PdfPage};

const CHUNK_SIZE: usize = 1000;
const CHUNK_OVERLAP: usize = 200;

struct MockPageReader {
    pages: Vec<PdfPage>,
}

impl MockPageReader {
    fn with_page_count(count: u32) -> Self {
        let pages = (1..=count)
            .map(|number| PdfPage {
                number,
                text: format!("Content of page {number}."),
                words: vec![],
                width: 612.0,
                height: 792.0,
            })
            .collect();
        Self { pages }
    }
}

#[async_trait::async_trait]
impl PageReader for MockPageReader {
    async fn read_pages(&self, _path: &Path) -> Result<Vec<PdfPage>, PageReaderError> {
        Ok(self.pages.clone())
    }
}

#[derive(Default)]
struct RecordingVectorStore {
    batch_sizes: Mutex<Vec<usize>>,
    fail_on_batch: Option<usize>,
    upsert_calls: AtomicUsize,
    deleted: AtomicBool,
    created: AtomicBool,
    collection_exists: bool,
}

#[async_trait::async_trait]
impl VectorStore for RecordingVectorStore {
    async fn create_collection(&self) -> Result<(), VectorStoreError> {
        self.created.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn exists(&self) -> Result<bool, VectorStoreError> {
        Ok(self.collection_exists)
    }

    async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        self.deleted.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn upsert(&self, chunks: &[Chunk]) -> Result<(), VectorStoreError> {
        let call = self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_batch == Some(call) {
            return Err(VectorStoreError::UpsertFailed("wire dropped".to_string()));
        }
        self.batch_sizes.lock().unwrap().push(chunks.len());
        Ok(())
    }

    async fn search(&self, _query: &str, _k: usize) -> Result<Vec<SearchHit>, VectorStoreError> {
        Ok(vec![])
    }
}

fn service(
    reader: MockPageReader,
    store: Arc<RecordingVectorStore>,
    batch_size: usize,
) -> IngestionService<MockPageReader, RecordingVectorStore> {
    let extractor = ChunkExtractor::new(Arc::new(reader), CHUNK_SIZE, CHUNK_OVERLAP);
    IngestionService::new(extractor, store, batch_size)
}

#[tokio::test]
async fn given_five_chunks_and_batch_of_two_when_ingesting_then_batches_are_sequential() {
    let store = Arc::new(RecordingVectorStore::default());
    let ingestion = service(MockPageReader::with_page_count(5), Arc::clone(&store), 2);

    let written = ingestion
        .ingest_document(Path::new("books/sample.pdf"), "sample")
        .await
        .unwrap();

    assert_eq!(written, 5);
    assert_eq!(*store.batch_sizes.lock().unwrap(), vec![2, 2, 1]);
}

#[tokio::test]
async fn given_failing_second_batch_when_ingesting_then_prefix_stays_committed() {
    let store = Arc::new(RecordingVectorStore {
        fail_on_batch: Some(1),
        ..Default::default()
    });
    let ingestion = service(MockPageReader::with_page_count(5), Arc::clone(&store), 2);

    let result = ingestion
        .ingest_document(Path::new("books/sample.pdf"), "sample")
        .await;

    assert!(matches!(result, Err(IngestionError::Storage(_))));
    // only the first batch reached the store before the failure
    assert_eq!(*store.batch_sizes.lock().unwrap(), vec![2]);
}

#[tokio::test]
async fn given_rebuild_when_preparing_collection_then_it_is_deleted_and_recreated() {
    let store = Arc::new(RecordingVectorStore {
        collection_exists: true,
        ..Default::default()
    });
    let ingestion = service(MockPageReader::with_page_count(1), Arc::clone(&store), 100);

    ingestion.prepare_collection(true).await.unwrap();

    assert!(store.deleted.load(Ordering::SeqCst));
    assert!(store.created.load(Ordering::SeqCst));
}

#[tokio::test]
async fn given_append_to_existing_collection_when_preparing_then_nothing_is_recreated() {
    let store = Arc::new(RecordingVectorStore {
        collection_exists: true,
        ..Default::default()
    });
    let ingestion = service(MockPageReader::with_page_count(1), Arc::clone(&store), 100);

    ingestion.prepare_collection(false).await.unwrap();

    assert!(!store.deleted.load(Ordering::SeqCst));
    assert!(!store.created.load(Ordering::SeqCst));
}

#[tokio::test]
async fn given_append_to_missing_collection_when_preparing_then_it_is_created() {
    let store = Arc::new(RecordingVectorStore::default());
    let ingestion = service(MockPageReader::with_page_count(1), Arc::clone(&store), 100);

    ingestion.prepare_collection(false).await.unwrap();

    assert!(!store.deleted.load(Ordering::SeqCst));
    assert!(store.created.load(Ordering::SeqCst));
}

#[tokio::test]
async fn given_unreadable_document_when_ingesting_then_extraction_error_is_surfaced() {
    struct EmptyPageReader;

    #[async_trait::async_trait]
    impl PageReader for EmptyPageReader {
        async fn read_pages(&self, _path: &Path) -> Result<Vec<PdfPage>, PageReaderError> {
            Ok(vec![])
        }
    }

    let store = Arc::new(RecordingVectorStore::default());
    let extractor = ChunkExtractor::new(Arc::new(EmptyPageReader), CHUNK_SIZE, CHUNK_OVERLAP);
    let ingestion = IngestionService::new(extractor, Arc::clone(&store), 100);

    let result = ingestion
        .ingest_document(Path::new("books/empty.pdf"), "empty")
        .await;

    assert!(matches!(result, Err(IngestionError::Extraction(_))));
    assert!(store.batch_sizes.lock().unwrap().is_empty());
}
