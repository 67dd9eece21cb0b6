use crate::application::ports::SearchHit;
use crate::domain::Confidence;

/// Two-tier similarity filtering over distance scores (lower = more
/// similar). Hits at or below the primary threshold pass with high
/// confidence; when none do, hits at or below the fallback threshold
/// pass with low confidence. A disabled (`None`) primary threshold lets
/// every hit through.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityFilter {
    primary: Option<f32>,
    fallback: Option<f32>,
}

#[derive(Debug)]
pub enum FilterOutcome {
    Matched {
        hits: Vec<SearchHit>,
        confidence: Confidence,
    },
    NoMatch {
        best_score: Option<f32>,
    },
}

impl SimilarityFilter {
    pub fn new(primary: Option<f32>, fallback: Option<f32>) -> Self {
        Self { primary, fallback }
    }

    pub fn primary_threshold(&self) -> Option<f32> {
        self.primary
    }

    pub fn fallback_threshold(&self) -> Option<f32> {
        self.fallback
    }

    /// `hits` must be ordered by ascending distance; rank order is
    /// preserved in the output. The comparison is `<=` on distances:
    /// a hit exactly at a threshold passes.
    pub fn apply(&self, hits: Vec<SearchHit>) -> FilterOutcome {
        let best_score = hits.first().map(|hit| hit.score);

        let kept = match self.primary {
            None => hits,
            Some(threshold) => {
                let passing: Vec<SearchHit> = hits
                    .iter()
                    .filter(|hit| hit.score <= threshold)
                    .cloned()
                    .collect();

                if !passing.is_empty() {
                    passing
                } else if let Some(fallback) = self.fallback {
                    let fallback_hits: Vec<SearchHit> = hits
                        .into_iter()
                        .filter(|hit| hit.score <= fallback)
                        .collect();

                    if fallback_hits.is_empty() {
                        return FilterOutcome::NoMatch { best_score };
                    }

                    return FilterOutcome::Matched {
                        hits: fallback_hits,
                        confidence: Confidence::Low,
                    };
                } else {
                    return FilterOutcome::NoMatch { best_score };
                }
            }
        };

        if kept.is_empty() {
            return FilterOutcome::NoMatch { best_score };
        }

        FilterOutcome::Matched {
            hits: kept,
            confidence: Confidence::High,
        }
    }
}
