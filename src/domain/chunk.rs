use super::bounding_box::BoundingBox;

/// A bounded span of a document's text plus its location metadata.
///
/// Created once during extraction and immutable thereafter. `page` is
/// 1-based; `chunk_index` is 0-based and unique within `(source, page)`.
/// `bbox` is absent when none of the chunk's anchor words could be
/// located on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub text: String,
    pub book_name: String,
    pub source: String,
    pub page: u32,
    pub chunk_index: u32,
    pub bbox: Option<BoundingBox>,
    pub page_width: f32,
    pub page_height: f32,
}

impl Chunk {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: String,
        book_name: String,
        source: String,
        page: u32,
        chunk_index: u32,
        bbox: Option<BoundingBox>,
        page_width: f32,
        page_height: f32,
    ) -> Self {
        Self {
            text,
            book_name,
            source,
            page,
            chunk_index,
            bbox,
            page_width,
            page_height,
        }
    }
}
