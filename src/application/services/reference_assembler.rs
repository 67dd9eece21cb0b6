use indexmap::IndexMap;

use crate::application::ports::SearchHit;
use crate::domain::{Reference, ReferenceKey};

/// Projects filtered hits into UI-facing references, dropping later hits
/// that cite the same chunk. The insertion-ordered map makes the
/// tie-break explicit: the first (best-ranked) occurrence of a key wins
/// and output order equals rank order. Pure transformation; no index or
/// network access.
pub fn assemble_references(hits: &[SearchHit]) -> Vec<Reference> {
    let mut by_key: IndexMap<ReferenceKey, Reference> = IndexMap::new();

    for hit in hits {
        by_key
            .entry(ReferenceKey::of(&hit.chunk))
            .or_insert_with(|| Reference::from_chunk(&hit.chunk, hit.score));
    }

    by_key.into_values().collect()
}
