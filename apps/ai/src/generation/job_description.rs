//! Job Description Generator: turns a title, company and optional notes into a full posting.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{
    ADDITIONAL_REQUIREMENTS_TEMPLATE, JOB_DESCRIPTION_PROMPT_TEMPLATE, JOB_DESCRIPTION_SECTIONS,
    JOB_DESCRIPTION_SYSTEM_TEMPLATE,
};
use crate::llm_client::{ChatOptions, LlmClient};

const DEFAULT_LOCALE: &str = "en";

const GENERATION_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.7,
    max_tokens: 1500,
};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateJobDescriptionRequest {
    pub title: String,
    pub company_name: String,
    /// Free-form extra requirements from the employer.
    #[serde(default)]
    pub prompts: Option<String>,
    /// Language/locale code, e.g. "en", "es", "fr".
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateJobDescriptionResponse {
    pub job_description: String,
    pub title: String,
    pub company_name: String,
    pub locale: String,
}

impl GenerateJobDescriptionRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if self.company_name.trim().is_empty() {
            return Err(AppError::Validation(
                "company_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn effective_locale(&self) -> &str {
        match self.locale.trim() {
            "" => DEFAULT_LOCALE,
            locale => locale,
        }
    }
}

pub fn build_system_prompt(title: &str, company_name: &str, locale: &str) -> String {
    JOB_DESCRIPTION_SYSTEM_TEMPLATE
        .replace("{locale}", locale)
        .replace("{company_name}", company_name)
        .replace("{title}", title)
}

pub fn build_user_prompt(title: &str, company_name: &str, prompts: Option<&str>) -> String {
    let mut prompt = JOB_DESCRIPTION_PROMPT_TEMPLATE
        .replace("{company_name}", company_name)
        .replace("{title}", title);

    if let Some(extra) = prompts.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str(&ADDITIONAL_REQUIREMENTS_TEMPLATE.replace("{prompts}", extra));
    }

    prompt.push_str(JOB_DESCRIPTION_SECTIONS);
    prompt
}

/// Generates a job description with the chat model.
pub async fn generate_job_description(
    request: GenerateJobDescriptionRequest,
    llm: &LlmClient,
) -> Result<GenerateJobDescriptionResponse, AppError> {
    request.validate()?;

    let title = request.title.trim();
    let company_name = request.company_name.trim();
    let locale = request.effective_locale();

    let system = build_system_prompt(title, company_name, locale);
    let prompt = build_user_prompt(title, company_name, request.prompts.as_deref());

    let job_description = llm
        .chat_text(&system, &prompt, GENERATION_OPTIONS)
        .await
        .map_err(|e| AppError::Llm(format!("Error generating job description: {e}")))?;

    info!(
        title,
        company_name,
        locale,
        chars = job_description.len(),
        "Job description generated"
    );

    Ok(GenerateJobDescriptionResponse {
        job_description,
        title: title.to_string(),
        company_name: company_name.to_string(),
        locale: locale.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, company: &str) -> GenerateJobDescriptionRequest {
        GenerateJobDescriptionRequest {
            title: title.to_string(),
            company_name: company.to_string(),
            prompts: None,
            locale: "en".to_string(),
        }
    }

    #[test]
    fn test_locale_defaults_to_en() {
        let req: GenerateJobDescriptionRequest =
            serde_json::from_str(r#"{"title": "Backend Engineer", "company_name": "Acme"}"#)
                .unwrap();
        assert_eq!(req.locale, "en");
        assert!(req.prompts.is_none());

        let mut req = request("Backend Engineer", "Acme");
        req.locale = "  ".to_string();
        assert_eq!(req.effective_locale(), "en");
    }

    #[test]
    fn test_validation_rejects_blank_fields() {
        assert!(matches!(
            request("  ", "Acme").validate(),
            Err(AppError::Validation(msg)) if msg.contains("title")
        ));
        assert!(matches!(
            request("Backend Engineer", "").validate(),
            Err(AppError::Validation(msg)) if msg.contains("company_name")
        ));
        assert!(request("Backend Engineer", "Acme").validate().is_ok());
    }

    #[test]
    fn test_system_prompt_mentions_locale_and_role() {
        let system = build_system_prompt("Data Engineer", "Initech", "fr");
        assert!(system.contains("Write in fr locale."));
        assert!(system.contains("Job Title: Data Engineer"));
        assert!(system.contains("Company: Initech"));
    }

    #[test]
    fn test_user_prompt_without_extra_requirements() {
        let prompt = build_user_prompt("Data Engineer", "Initech", None);
        assert!(prompt
            .starts_with("Please create a detailed job description for a Data Engineer position at Initech."));
        assert!(!prompt.contains("Additional requirements"));
        assert!(prompt.ends_with(
            "Include sections for: Job Overview, Key Responsibilities, Required Qualifications, \
             Preferred Qualifications, and Benefits/Compensation if applicable."
        ));

        let blank = build_user_prompt("Data Engineer", "Initech", Some("   "));
        assert_eq!(blank, prompt);
    }

    #[test]
    fn test_user_prompt_appends_extra_requirements_before_sections() {
        let prompt = build_user_prompt("Data Engineer", "Initech", Some("Remote, Spark required"));
        let extra = prompt.find("Additional requirements:\nRemote, Spark required").unwrap();
        let sections = prompt.find("Include sections for").unwrap();
        assert!(extra < sections);
    }

    #[tokio::test]
    async fn test_unconfigured_client_surfaces_llm_error() {
        let llm = LlmClient::new(None, "https://api.openai.com/v1").unwrap();
        let err = generate_job_description(request("Backend Engineer", "Acme"), &llm)
            .await
            .unwrap_err();
        match err {
            AppError::Llm(msg) => assert!(msg.contains("Error generating job description")),
            other => panic!("expected LLM error, got {other:?}"),
        }
    }
}
