use crate::documents::s3::DocumentStore;
use crate::llm_client::LlmClient;
use crate::matching::engine::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Embedding-based matcher. Built on top of `llm` in production, on a test double in tests.
    pub matcher: MatchEngine,
    pub documents: DocumentStore,
}
