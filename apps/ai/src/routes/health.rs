use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Taeab AI Service",
        "status": "running"
    }))
}

/// GET /health
/// Reports whether the LLM provider key is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "openai_configured": state.llm.is_configured()
    }))
}

/// GET /api/v1/status
pub async fn status_handler() -> Json<Value> {
    Json(json!({
        "service": "ai",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational"
    }))
}
