//! CV Analyzer: extracts a structured `ParsedCv` from raw CV text.

use serde::Deserialize;
use tracing::info;

use crate::cv::prompts::{CV_PARSE_PROMPT, CV_PARSE_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::NO_INVENTION_INSTRUCTION;
use crate::llm_client::{ChatOptions, LlmClient};
use crate::models::resume::ParsedCv;

/// CVs longer than this (in characters) are refused.
pub const MAX_CV_CHARS: usize = 100_000;

const EXTRACTION_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.0,
    max_tokens: 2000,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeCvRequest {
    #[serde(default)]
    pub s3_url: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
}

/// Where the CV text comes from. Inline text wins over a stored document.
#[derive(Debug, PartialEq, Eq)]
pub enum CvSource<'a> {
    RawText(&'a str),
    Stored(&'a str),
}

impl AnalyzeCvRequest {
    pub fn source(&self) -> Result<CvSource<'_>, AppError> {
        if let Some(text) = self.raw_text.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(CvSource::RawText(text));
        }
        if let Some(url) = self.s3_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(CvSource::Stored(url));
        }
        Err(AppError::Validation(
            "Either raw_text or s3_url must be provided".to_string(),
        ))
    }
}

pub fn build_cv_prompt(cv_text: &str) -> String {
    CV_PARSE_PROMPT
        .replace("{no_invention_instruction}", NO_INVENTION_INSTRUCTION)
        .replace("{cv_text}", cv_text)
}

fn check_length(cv_text: &str) -> Result<(), AppError> {
    let chars = cv_text.chars().count();
    if chars > MAX_CV_CHARS {
        return Err(AppError::Validation(format!(
            "CV text is {chars} characters, limit is {MAX_CV_CHARS}"
        )));
    }
    Ok(())
}

/// Runs the extraction prompt over `cv_text` and returns the structured CV.
pub async fn analyze_cv(cv_text: &str, llm: &LlmClient) -> Result<ParsedCv, AppError> {
    check_length(cv_text)?;

    let prompt = build_cv_prompt(cv_text.trim());
    let parsed: ParsedCv = llm
        .chat_json(CV_PARSE_SYSTEM, &prompt, EXTRACTION_OPTIONS)
        .await
        .map_err(|e| AppError::Llm(format!("CV analysis failed: {e}")))?;

    if parsed.is_empty() {
        return Err(AppError::Validation(
            "No resume content could be extracted from the CV".to_string(),
        ));
    }

    info!(
        skills = parsed.profile.skills.len(),
        experiences = parsed.profile.experiences.len(),
        education = parsed.profile.education.len(),
        "CV analyzed"
    );

    Ok(parsed)
}
