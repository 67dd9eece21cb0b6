use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError, VectorStore, VectorStoreError};
use crate::application::services::reference_assembler::assemble_references;
use crate::application::services::similarity_filter::{FilterOutcome, SimilarityFilter};
use crate::domain::{Answer, AnswerMetadata, NO_SIMILAR_DOCUMENT};

const NO_MATCH_MESSAGE: &str = "No sufficiently similar textbook content was found. \
     Please try a different or more specific question.";

pub struct QaService<L, V>
where
    L: LlmClient + ?Sized,
    V: VectorStore,
{
    llm_client: Arc<L>,
    vector_store: Arc<V>,
    filter: SimilarityFilter,
}

impl<L, V> QaService<L, V>
where
    L: LlmClient + ?Sized,
    V: VectorStore,
{
    pub fn new(llm_client: Arc<L>, vector_store: Arc<V>, filter: SimilarityFilter) -> Self {
        Self {
            llm_client,
            vector_store,
            filter,
        }
    }

    /// Answers `question` from the top-`k` most similar chunks. Holds no
    /// per-call state; safe to invoke concurrently from multiple callers.
    #[tracing::instrument(skip(self, question))]
    pub async fn answer(&self, question: &str, k: usize) -> Result<Answer, QaError> {
        if question.trim().is_empty() {
            return Err(QaError::EmptyQuestion);
        }

        let hits = self
            .vector_store
            .search(question, k)
            .await
            .map_err(QaError::Search)?;

        let (hits, confidence) = match self.filter.apply(hits) {
            FilterOutcome::NoMatch { best_score } => {
                tracing::info!(?best_score, "no chunk passed the similarity thresholds");
                return Ok(Answer {
                    question: question.to_string(),
                    answer: NO_MATCH_MESSAGE.to_string(),
                    references: Vec::new(),
                    metadata: AnswerMetadata {
                        confidence: None,
                        threshold: self.filter.primary_threshold(),
                        fallback_threshold: self.filter.fallback_threshold(),
                        reason: Some(NO_SIMILAR_DOCUMENT.to_string()),
                        best_score,
                    },
                });
            }
            FilterOutcome::Matched { hits, confidence } => (hits, confidence),
        };

        let references = assemble_references(&hits);

        let context = hits
            .iter()
            .map(|hit| hit.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = build_prompt(&context, question);

        let answer = self
            .llm_client
            .complete(&prompt)
            .await
            .map_err(QaError::Generation)?;

        if answer.trim().is_empty() {
            return Err(QaError::Generation(LlmClientError::InvalidResponse(
                "empty completion".to_string(),
            )));
        }

        tracing::info!(
            reference_count = references.len(),
            ?confidence,
            "answer generated"
        );

        Ok(Answer {
            question: question.to_string(),
            answer,
            references,
            metadata: AnswerMetadata {
                confidence: Some(confidence),
                threshold: self.filter.primary_threshold(),
                fallback_threshold: self.filter.fallback_threshold(),
                reason: None,
                best_score: None,
            },
        })
    }
}

fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the question accurately based on the following textbook content.\n\n\
         Textbook content:\n{context}\n\n\
         Question: {question}\n\n\
         Answer (explain in detail, grounded in the textbook content):"
    )
}

#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
    #[error("generation: {0}")]
    Generation(LlmClientError),
}
