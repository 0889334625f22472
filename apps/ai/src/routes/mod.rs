pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cv::handlers::handle_analyze_cv;
use crate::generation::handlers::handle_generate_job_description;
use crate::matching::handlers::handle_match;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/status", get(health::status_handler))
        // AI API
        .route(
            "/ai/generate-job-description",
            post(handle_generate_job_description),
        )
        .route("/ai/analyze-cv", post(handle_analyze_cv))
        .route("/ai/match", post(handle_match))
        .with_state(state)
}
