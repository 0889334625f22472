use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Application configuration loaded from environment variables.
/// Only `PORT` can fail startup; every provider setting is optional so the
/// service can boot (and report itself unconfigured) without credentials.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub s3_endpoint: Option<String>,
    pub s3_bucket: Option<String>,
    pub aws_region: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            s3_endpoint: optional_env("S3_ENDPOINT"),
            s3_bucket: optional_env("S3_BUCKET"),
            aws_region: optional_env("AWS_REGION")
                .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            aws_access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
            port: parse_port(optional_env("PORT"))?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Static S3 credentials, only when both halves are present.
    pub fn static_aws_credentials(&self) -> Option<(&str, &str)> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

/// Reads an env var, treating unset and blank values the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    match raw {
        Some(value) => value
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got '{value}'")),
        None => Ok(8000),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        openai_api_key: Some("test-key".to_string()),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        s3_endpoint: None,
        s3_bucket: Some("resumes".to_string()),
        aws_region: DEFAULT_AWS_REGION.to_string(),
        aws_access_key_id: None,
        aws_secret_access_key: None,
        port: 8000,
        rust_log: "debug".to_string(),
    }
}
