mod chunk_extractor;
mod ingestion_service;
mod qa_service;
mod reference_assembler;
mod similarity_filter;

pub use chunk_extractor::ChunkExtractor;
pub use ingestion_service::{IngestionError, IngestionService};
pub use qa_service::{QaError, QaService};
pub use reference_assembler::assemble_references;
pub use similarity_filter::{FilterOutcome, SimilarityFilter};
