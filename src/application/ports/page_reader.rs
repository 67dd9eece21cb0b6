use std::path::Path;

use async_trait::async_trait;

use crate::domain::PdfPage;

/// PDF text/layout extraction collaborator. Returns pages in reading
/// order with word positions and page dimensions.
#[async_trait]
pub trait PageReader: Send + Sync {
    async fn read_pages(&self, path: &Path) -> Result<Vec<PdfPage>, PageReaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PageReaderError {
    #[error("failed to open document: {0}")]
    OpenFailed(String),
    #[error("no extractable text in document: {0}")]
    NoTextFound(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
