//! Candidate profile text: turns a `ResumeProfile` into the single string that gets embedded.
//!
//! The section order and separators are part of the matching behavior: any drift here
//! changes the candidate embedding and therefore every score. Each section has its own
//! formatter so they can be tested in isolation.

use crate::errors::AppError;
use crate::models::resume::{Education, Experience, ResumeProfile};

const SECTION_SEPARATOR: &str = ". ";

/// `"Skills: Go, SQL"`, or `None` when there are no skills.
pub fn skills_section(skills: &[String]) -> Option<String> {
    if skills.is_empty() {
        return None;
    }
    Some(format!("Skills: {}", skills.join(", ")))
}

/// `"{title} at {company}"`, with `": {summary}"` only when the summary is non-empty.
pub fn format_experience(experience: &Experience) -> String {
    let mut line = format!("{} at {}", experience.title, experience.company);
    if !experience.summary.is_empty() {
        line.push_str(": ");
        line.push_str(&experience.summary);
    }
    line
}

pub fn experience_section(experiences: &[Experience]) -> Option<String> {
    if experiences.is_empty() {
        return None;
    }
    let lines: Vec<String> = experiences.iter().map(format_experience).collect();
    Some(format!("Experience: {}", lines.join(SECTION_SEPARATOR)))
}

/// Present fields among degree, field and `"from {institution}"`, joined with `", "`.
/// `None` when the entry has nothing to say.
pub fn format_education(education: &Education) -> Option<String> {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if let Some(degree) = education.degree.as_deref().filter(|d| !d.is_empty()) {
        parts.push(degree.to_string());
    }
    if let Some(field) = education.field.as_deref().filter(|f| !f.is_empty()) {
        parts.push(field.to_string());
    }
    if !education.institution.is_empty() {
        parts.push(format!("from {}", education.institution));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Entries that format to nothing are dropped. If every entry is dropped the
/// section still renders as a bare `"Education: "` prefix.
pub fn education_section(education: &[Education]) -> Option<String> {
    if education.is_empty() {
        return None;
    }
    let lines: Vec<String> = education.iter().filter_map(format_education).collect();
    Some(format!("Education: {}", lines.join(SECTION_SEPARATOR)))
}

/// Builds the candidate text in fixed order: skills, experience, education.
/// Fails with a validation error when the profile has no content at all.
pub fn build_candidate_profile(profile: &ResumeProfile) -> Result<String, AppError> {
    let sections: Vec<String> = [
        skills_section(&profile.skills),
        experience_section(&profile.experiences),
        education_section(&profile.education),
    ]
    .into_iter()
    .flatten()
    .collect();

    let text = sections.join(SECTION_SEPARATOR);
    if text.is_empty() {
        return Err(AppError::Validation(
            "candidate_resume_parsed_json has no skills, experiences, or education".to_string(),
        ));
    }
    Ok(text)
}
