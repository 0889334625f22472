//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::engine::MatchResult;
use crate::models::resume::ResumeProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// Opaque caller identifier, echoed back untouched.
    #[serde(default)]
    pub job_id: Option<Value>,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub candidate_resume_parsed_json: ResumeProfile,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Value>,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// POST /ai/match
///
/// Scores a parsed resume against a job description using embeddings.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if !state.llm.is_configured() {
        return Err(AppError::LlmNotConfigured);
    }

    let result = state
        .matcher
        .match_resume(
            &request.job_description,
            &request.candidate_resume_parsed_json,
        )
        .await?;

    Ok(Json(MatchResponse {
        job_id: request.job_id,
        result,
    }))
}
