//! Axum route handlers for the CV API.

use axum::{extract::State, Json};

use crate::cv::analyzer::{analyze_cv, AnalyzeCvRequest, CvSource};
use crate::errors::AppError;
use crate::models::resume::ParsedCv;
use crate::state::AppState;

/// POST /ai/analyze-cv
///
/// Extracts a structured CV from inline `raw_text` or a stored document at `s3_url`.
/// The response is the shape `/ai/match` accepts as `candidate_resume_parsed_json`.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeCvRequest>,
) -> Result<Json<ParsedCv>, AppError> {
    if !state.llm.is_configured() {
        return Err(AppError::LlmNotConfigured);
    }

    let parsed = match request.source()? {
        CvSource::RawText(text) => analyze_cv(text, &state.llm).await?,
        CvSource::Stored(url) => {
            let text = state.documents.fetch_text(url).await?;
            analyze_cv(&text, &state.llm).await?
        }
    };

    Ok(Json(parsed))
}
