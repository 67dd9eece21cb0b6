use super::bounding_box::BoundingBox;

/// A single word on a page together with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct WordBox {
    pub text: String,
    pub bbox: BoundingBox,
}

/// Extracted content of one PDF page: raw text, word positions for
/// bounding-box resolution, and page dimensions in the same coordinate
/// space as the word boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    pub number: u32,
    pub text: String,
    pub words: Vec<WordBox>,
    pub width: f32,
    pub height: f32,
}
