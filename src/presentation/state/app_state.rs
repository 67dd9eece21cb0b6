use std::sync::Arc;

use crate::application::ports::{LlmClient, VectorStore};
use crate::application::services::QaService;

pub struct AppState<L, V>
where
    L: LlmClient + ?Sized,
    V: VectorStore,
{
    pub qa_service: Arc<QaService<L, V>>,
}

impl<L, V> Clone for AppState<L, V>
where
    L: LlmClient + ?Sized,
    V: VectorStore,
{
    fn clone(&self) -> Self {
        Self {
            qa_service: Arc::clone(&self.qa_service),
        }
    }
}
