//! Structured resume data exchanged with callers.
//!
//! `ParsedCv` is what `/ai/analyze-cv` produces; its `ResumeProfile` part is
//! exactly what `/ai/match` accepts back as `candidate_resume_parsed_json`.
//! Deserialization is lenient because these shapes usually come from model output:
//! missing lists become empty, `null` strings become empty, years may be numbers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The parts of a resume the matcher reads. Immutable within a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default, deserialize_with = "list_or_null")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub experiences: Vec<Experience>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "string_or_null")]
    pub company: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(default, alias = "start")]
    pub start_date: Option<String>,
    /// `"Present"` (or absent) for the current position.
    #[serde(default, alias = "end")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "string_or_null")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "string_or_null")]
    pub institution: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "year_string_or_number")]
    pub year: Option<String>,
}

/// Full CV extraction result: contact details plus the matchable profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCv {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub profile: ResumeProfile,
}

impl ParsedCv {
    /// True when the extraction found nothing worth storing.
    pub fn is_empty(&self) -> bool {
        self.profile.skills.is_empty()
            && self.profile.experiences.is_empty()
            && self.profile.education.is_empty()
            && self.name.as_deref().map_or(true, |n| n.trim().is_empty())
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn list_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn year_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "year must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_default_to_empty() {
        let profile: ResumeProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, ResumeProfile::default());

        let profile: ResumeProfile =
            serde_json::from_str(r#"{"skills": null, "experiences": null}"#).unwrap();
        assert!(profile.skills.is_empty());
        assert!(profile.experiences.is_empty());
    }

    #[test]
    fn test_experience_accepts_short_date_names_and_nulls() {
        let json = r#"{
            "company": "Acme",
            "title": "Backend Engineer",
            "start": "2020-01",
            "end": "Present",
            "summary": null
        }"#;
        let exp: Experience = serde_json::from_str(json).unwrap();
        assert_eq!(exp.start_date.as_deref(), Some("2020-01"));
        assert_eq!(exp.end_date.as_deref(), Some("Present"));
        assert_eq!(exp.summary, "");
    }

    #[test]
    fn test_education_year_accepts_number() {
        let edu: Education =
            serde_json::from_str(r#"{"institution": "MIT", "year": 2019}"#).unwrap();
        assert_eq!(edu.year.as_deref(), Some("2019"));

        let edu: Education =
            serde_json::from_str(r#"{"institution": "MIT", "year": "2019"}"#).unwrap();
        assert_eq!(edu.year.as_deref(), Some("2019"));

        assert!(serde_json::from_str::<Education>(r#"{"year": [2019]}"#).is_err());
    }

    #[test]
    fn test_parsed_cv_flattens_profile() {
        let json = r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "skills": ["Go", "SQL"],
            "experiences": [{"company": "Acme", "title": "SRE", "summary": "On-call lead"}],
            "education": [{"institution": "MIT", "degree": "BSc", "field": "CS", "year": 2015}]
        }"#;
        let cv: ParsedCv = serde_json::from_str(json).unwrap();
        assert_eq!(cv.name.as_deref(), Some("Jane Doe"));
        assert_eq!(cv.profile.skills, vec!["Go", "SQL"]);
        assert_eq!(cv.profile.experiences[0].company, "Acme");
        assert_eq!(cv.profile.education[0].year.as_deref(), Some("2015"));
        assert!(!cv.is_empty());

        // Round-trips back into the shape /ai/match accepts.
        let value = serde_json::to_value(&cv).unwrap();
        let profile: ResumeProfile = serde_json::from_value(value).unwrap();
        assert_eq!(profile, cv.profile);
    }

    #[test]
    fn test_parsed_cv_empty_detection() {
        assert!(ParsedCv::default().is_empty());
        let cv = ParsedCv {
            name: Some("  ".to_string()),
            ..ParsedCv::default()
        };
        assert!(cv.is_empty());
    }
}
