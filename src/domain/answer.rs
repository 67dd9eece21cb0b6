use serde::Serialize;

use super::reference::Reference;

/// Confidence tier of a retrieval: `High` when hits passed the primary
/// similarity threshold, `Low` when only the fallback threshold admitted
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    pub threshold: Option<f32>,
    pub fallback_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f32>,
}

/// Result of one question, computed fresh per request and never persisted.
/// References are ordered best-first (ascending distance).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub references: Vec<Reference>,
    pub metadata: AnswerMetadata,
}

/// Reason recorded when no hit passed either threshold tier.
pub const NO_SIMILAR_DOCUMENT: &str = "no_similar_document";
