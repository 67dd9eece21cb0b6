use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdfium_render::prelude::*;

use crate::application::ports::{PageReader, PageReaderError};
use crate::domain::{BoundingBox, PdfPage, WordBox};

/// Extracts page text, word positions, and page dimensions through
/// pdfium. Pages without extractable text are skipped; a document where
/// every page is empty fails with `NoTextFound`.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageReader for PdfAdapter {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    async fn read_pages(&self, path: &Path) -> Result<Vec<PdfPage>, PageReaderError> {
        let owned_path = path.to_path_buf();

        let pages = tokio::task::spawn_blocking(move || extract_pages(&owned_path))
            .await
            .map_err(|e| PageReaderError::ExtractionFailed(format!("task join error: {e}")))??;

        if pages.is_empty() {
            return Err(PageReaderError::NoTextFound(path.display().to_string()));
        }

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");
        Ok(pages)
    }
}

fn extract_pages(path: &PathBuf) -> Result<Vec<PdfPage>, PageReaderError> {
    let pdfium = Pdfium::new(
        Pdfium::bind_to_system_library()
            .map_err(|e| PageReaderError::OpenFailed(format!("pdfium bind failed: {e}")))?,
    );

    let doc = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| PageReaderError::OpenFailed(format!("failed to open PDF: {e}")))?;

    let mut pages = Vec::new();

    for (index, page) in doc.pages().iter().enumerate() {
        let text_page = page.text().map_err(|e| {
            PageReaderError::ExtractionFailed(format!("text extraction for page {index} failed: {e}"))
        })?;

        let text = text_page.all();
        if text.trim().is_empty() {
            continue;
        }

        pages.push(PdfPage {
            number: (index + 1) as u32,
            text,
            words: collect_word_boxes(&text_page),
            width: page.width().value,
            height: page.height().value,
        });
    }

    Ok(pages)
}

/// Groups page characters into whitespace-delimited words, unioning the
/// character boxes into one box per word.
fn collect_word_boxes(text_page: &PdfPageText) -> Vec<WordBox> {
    let mut words = Vec::new();
    let mut current_text = String::new();
    let mut current_bbox: Option<BoundingBox> = None;

    for character in text_page.chars().iter() {
        let ch = character.unicode_char().unwrap_or(' ');

        if ch.is_whitespace() {
            flush_word(&mut words, &mut current_text, &mut current_bbox);
            continue;
        }

        current_text.push(ch);

        if let Ok(rect) = character.loose_bounds() {
            let char_bbox = BoundingBox::from_corners(
                rect.left.value,
                rect.bottom.value,
                rect.right.value,
                rect.top.value,
            );
            current_bbox = Some(match current_bbox {
                Some(bbox) => bbox.union(&char_bbox),
                None => char_bbox,
            });
        }
    }

    flush_word(&mut words, &mut current_text, &mut current_bbox);
    words
}

fn flush_word(
    words: &mut Vec<WordBox>,
    text: &mut String,
    bbox: &mut Option<BoundingBox>,
) {
    if !text.is_empty() {
        if let Some(bbox) = bbox.take() {
            words.push(WordBox {
                text: std::mem::take(text),
                bbox,
            });
            return;
        }
    }
    text.clear();
    *bbox = None;
}
