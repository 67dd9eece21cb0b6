use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{PageReader, PageReaderError};
use crate::domain::{BoundingBox, Chunk, WordBox};
use crate::infrastructure::text_processing::RecursiveCharacterSplitter;

/// Anchor words taken from each end of a chunk when resolving its
/// bounding box.
const ANCHOR_WORDS_PER_END: usize = 5;

/// Turns a document into chunks tagged with page number, chunk index,
/// page dimensions, and a best-effort bounding box. Holds no state
/// between runs; extracting the same document twice yields the same
/// sequence.
pub struct ChunkExtractor<P>
where
    P: PageReader,
{
    page_reader: Arc<P>,
    splitter: RecursiveCharacterSplitter,
}

impl<P> ChunkExtractor<P>
where
    P: PageReader,
{
    pub fn new(page_reader: Arc<P>, chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            page_reader,
            splitter: RecursiveCharacterSplitter::new(chunk_size, chunk_overlap),
        }
    }

    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn extract(
        &self,
        path: &Path,
        book_name: &str,
    ) -> Result<Vec<Chunk>, PageReaderError> {
        let pages = self.page_reader.read_pages(path).await?;

        if pages.is_empty() {
            return Err(PageReaderError::NoTextFound(path.display().to_string()));
        }

        let source = path.display().to_string();
        let mut chunks = Vec::new();

        for page in &pages {
            for (chunk_index, text) in self.splitter.split_text(&page.text).into_iter().enumerate()
            {
                let bbox = resolve_bbox(&text, &page.words);
                chunks.push(Chunk::new(
                    text,
                    book_name.to_string(),
                    source.clone(),
                    page.number,
                    chunk_index as u32,
                    bbox,
                    page.width,
                    page.height,
                ));
            }
        }

        tracing::info!(
            page_count = pages.len(),
            chunk_count = chunks.len(),
            "document chunked"
        );

        Ok(chunks)
    }
}

/// Unions the boxes of all page words containing one of the chunk's
/// anchor words (its first and last five whitespace-delimited tokens).
/// Returns `None` when nothing matches; absence means "no highlight
/// available", never an error.
fn resolve_bbox(chunk_text: &str, words: &[WordBox]) -> Option<BoundingBox> {
    let tokens: Vec<&str> = chunk_text.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    let head = tokens.iter().take(ANCHOR_WORDS_PER_END);
    let tail = tokens
        .iter()
        .skip(tokens.len().saturating_sub(ANCHOR_WORDS_PER_END));
    let anchors: Vec<&str> = head.chain(tail).copied().collect();

    let mut resolved: Option<BoundingBox> = None;
    for word in words {
        if anchors.iter().any(|anchor| word.text.contains(anchor)) {
            resolved = Some(match resolved {
                Some(bbox) => bbox.union(&word.bbox),
                None => word.bbox,
            });
        }
    }

    resolved
}
