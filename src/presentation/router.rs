use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmClient, VectorStore};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, query_handler};
use crate::presentation::state::AppState;

pub fn create_router<L, V>(state: AppState<L, V>) -> Router
where
    L: LlmClient + ?Sized + 'static,
    V: VectorStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/query", post(query_handler::<L, V>))
        // alias kept for the frontend's analyzeLearningQuery() caller
        .route("/api/analyze", post(query_handler::<L, V>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
