use crate::domain::Chunk;

/// One similarity-search result. `score` is a cosine distance: lower
/// means more similar.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub chunk: Chunk,
    pub score: f32,
}
