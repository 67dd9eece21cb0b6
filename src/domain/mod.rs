mod answer;
mod bounding_box;
mod chunk;
mod embedding;
mod page;
mod reference;

pub use answer::{Answer, AnswerMetadata, Confidence, NO_SIMILAR_DOCUMENT};
pub use bounding_box::BoundingBox;
pub use chunk::Chunk;
pub use embedding::Embedding;
pub use page::{PdfPage, WordBox};
pub use reference::{Reference, ReferenceKey};
