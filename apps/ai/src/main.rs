mod config;
mod cv;
mod documents;
mod errors;
mod generation;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::s3::{build_s3_client, DocumentStore};
use crate::llm_client::LlmClient;
use crate::matching::engine::MatchEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI service v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    if llm.is_configured() {
        info!(
            "OpenAI client initialized (chat: {}, embeddings: {})",
            llm_client::CHAT_MODEL,
            llm_client::EMBEDDING_MODEL
        );
    } else {
        warn!("OPENAI_API_KEY not set; AI endpoints will return LLM_NOT_CONFIGURED");
    }

    let matcher = MatchEngine::new(Arc::new(llm.clone()));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let documents = DocumentStore::new(s3, config.s3_bucket.clone());
    info!("S3 client initialized");

    let state = AppState {
        llm,
        matcher,
        documents,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web app domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
