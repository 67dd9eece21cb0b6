use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, VectorStore};
use crate::application::services::QaError;
use crate::presentation::state::AppState;

fn default_k() -> usize {
    5
}

#[derive(Deserialize)]
pub struct QueryRequest {
    pub question: String,
    #[serde(default = "default_k")]
    pub k: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn query_handler<L, V>(
    State(state): State<AppState<L, V>>,
    Json(request): Json<QueryRequest>,
) -> impl IntoResponse
where
    L: LlmClient + ?Sized + 'static,
    V: VectorStore + 'static,
{
    match state.qa_service.answer(&request.question, request.k).await {
        Ok(answer) => {
            tracing::info!(
                reference_count = answer.references.len(),
                "query answered"
            );
            (StatusCode::OK, Json(answer)).into_response()
        }
        Err(e @ QaError::EmptyQuestion) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ QaError::Search(_)) => {
            tracing::error!(error = %e, "vector index unavailable");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Search failed: {}", e),
                }),
            )
                .into_response()
        }
        Err(e @ QaError::Generation(_)) => {
            tracing::error!(error = %e, "answer generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Generation failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
