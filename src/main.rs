use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use akashic::application::services::{QaService, SimilarityFilter};
use akashic::infrastructure::llm::{EmbedderFactory, LlmClientFactory};
use akashic::infrastructure::observability::{init_tracing, TracingConfig};
use akashic::infrastructure::persistence::QdrantAdapter;
use akashic::presentation::config::{Environment, Settings};
use akashic::presentation::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment)?;

    init_tracing(TracingConfig::default());

    let embedder = EmbedderFactory::create(&settings.embeddings)?;
    let llm_client = LlmClientFactory::create(&settings.llm)?;

    let vector_store = Arc::new(
        QdrantAdapter::new(
            &settings.qdrant.url,
            settings.qdrant.collection_name.clone(),
            Arc::clone(&embedder),
            settings.embeddings.dimension,
        )
        .await?,
    );

    let filter = SimilarityFilter::new(
        settings.retrieval.similarity_threshold,
        settings.retrieval.fallback_threshold,
    );

    let qa_service = Arc::new(QaService::new(llm_client, vector_store, filter));

    let router = create_router(AppState { qa_service });

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
