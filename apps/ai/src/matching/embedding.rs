//! Embedding seam. The matcher depends on this trait, never on the concrete provider client,
//! so tests can substitute a scripted double.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Returns the embedding vector for `text`. Errors are opaque to the matcher.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

#[async_trait]
impl EmbeddingClient for LlmClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        LlmClient::embed(self, text).await
    }
}
