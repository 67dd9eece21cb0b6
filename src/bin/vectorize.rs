use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use walkdir::WalkDir;

use akashic::application::services::{ChunkExtractor, IngestionService};
use akashic::infrastructure::llm::EmbedderFactory;
use akashic::infrastructure::observability::{init_tracing, TracingConfig};
use akashic::infrastructure::persistence::QdrantAdapter;
use akashic::infrastructure::text_processing::PdfAdapter;
use akashic::presentation::config::{Environment, Settings};

#[derive(Parser)]
#[command(
    name = "vectorize",
    about = "Vectorize every PDF under a folder into the vector store",
    version
)]
struct Cli {
    /// Folder containing PDF files (searched recursively)
    folder: PathBuf,

    /// Keep the existing collection and add embeddings on top of it
    #[arg(long)]
    append: bool,

    /// Chunks written per vector store batch
    #[arg(long)]
    batch_size: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment)?;

    init_tracing(TracingConfig::default());

    let pdfs = list_pdfs(&cli.folder)?;
    anyhow::ensure!(
        !pdfs.is_empty(),
        "no PDF files under {}",
        cli.folder.display()
    );
    tracing::info!(
        folder = %cli.folder.display(),
        document_count = pdfs.len(),
        "PDF files detected"
    );

    let embedder = EmbedderFactory::create(&settings.embeddings)?;
    let vector_store = Arc::new(
        QdrantAdapter::new(
            &settings.qdrant.url,
            settings.qdrant.collection_name.clone(),
            embedder,
            settings.embeddings.dimension,
        )
        .await?,
    );

    let extractor = ChunkExtractor::new(
        Arc::new(PdfAdapter::new()),
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    );
    let batch_size = cli.batch_size.unwrap_or(settings.ingestion.batch_size);
    let ingestion = IngestionService::new(extractor, vector_store, batch_size);

    ingestion.prepare_collection(!cli.append).await?;

    for pdf in &pdfs {
        let book_name = pdf
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        let chunk_count = ingestion.ingest_document(pdf, &book_name).await?;
        tracing::info!(path = %pdf.display(), chunk_count, "document vectorized");
    }

    tracing::info!(document_count = pdfs.len(), "vectorization complete");
    Ok(())
}

fn list_pdfs(folder: &Path) -> anyhow::Result<Vec<PathBuf>> {
    anyhow::ensure!(folder.is_dir(), "not a folder: {}", folder.display());

    let mut pdfs: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    pdfs.sort();
    Ok(pdfs)
}
