//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::job_description::{
    generate_job_description, GenerateJobDescriptionRequest, GenerateJobDescriptionResponse,
};
use crate::state::AppState;

/// POST /ai/generate-job-description
///
/// Generates a job description from title, company name, optional prompts and locale.
pub async fn handle_generate_job_description(
    State(state): State<AppState>,
    Json(request): Json<GenerateJobDescriptionRequest>,
) -> Result<Json<GenerateJobDescriptionResponse>, AppError> {
    if !state.llm.is_configured() {
        return Err(AppError::LlmNotConfigured);
    }

    let response = generate_job_description(request, &state.llm).await?;
    Ok(Json(response))
}
