use serde::Serialize;

use super::bounding_box::BoundingBox;
use super::chunk::Chunk;

/// Number of characters of chunk text exposed in `content_preview`.
const PREVIEW_CHAR_LIMIT: usize = 200;

/// De-duplicated, UI-ready citation of a chunk backing an answer.
///
/// Bounding-box coordinates are serialized both nested (`bbox`) and flat
/// (`x1..y2`); the frontend highlight layer consumes the flat fields while
/// older clients read the nested object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub book_name: String,
    pub page: u32,
    pub chunk_index: u32,
    pub source: String,
    pub document: String,
    pub content_preview: String,
    pub page_width: f32,
    pub page_height: f32,
    pub bbox: Option<BoundingBox>,
    pub x1: Option<f32>,
    pub y1: Option<f32>,
    pub x2: Option<f32>,
    pub y2: Option<f32>,
    pub score: f32,
}

/// Composite key two hits must share to be considered the same reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    pub book_name: String,
    pub page: u32,
    pub chunk_index: u32,
    pub source: String,
}

impl ReferenceKey {
    pub fn of(chunk: &Chunk) -> Self {
        Self {
            book_name: chunk.book_name.clone(),
            page: chunk.page,
            chunk_index: chunk.chunk_index,
            source: chunk.source.clone(),
        }
    }
}

impl Reference {
    pub fn from_chunk(chunk: &Chunk, score: f32) -> Self {
        let content_preview: String = chunk
            .text
            .chars()
            .take(PREVIEW_CHAR_LIMIT)
            .chain("...".chars())
            .collect();

        Self {
            book_name: chunk.book_name.clone(),
            page: chunk.page,
            chunk_index: chunk.chunk_index,
            source: chunk.source.clone(),
            document: chunk.text.clone(),
            content_preview,
            page_width: chunk.page_width,
            page_height: chunk.page_height,
            bbox: chunk.bbox,
            x1: chunk.bbox.map(|b| b.x1),
            y1: chunk.bbox.map(|b| b.y1),
            x2: chunk.bbox.map(|b| b.x2),
            y2: chunk.bbox.map(|b| b.y2),
            score,
        }
    }
}
