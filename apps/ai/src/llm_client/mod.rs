/// LLM Client: the single point of entry for all OpenAI API calls in the AI service.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Chat completions and embeddings both go through this module.
///
/// Models are hardcoded constants, not configuration.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// The chat model used for generation and CV extraction.
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";
/// The embedding model used by the matcher.
pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenAI API key is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Sampling knobs for a single chat call.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the trimmed text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    /// The provider must answer a single input with exactly one non-empty vector.
    fn into_single_vector(self) -> Result<Vec<f32>, LlmError> {
        let mut data = self.data;
        if data.len() != 1 {
            return Err(LlmError::MalformedResponse(format!(
                "expected 1 embedding, got {}",
                data.len()
            )));
        }
        let vector = data.remove(0).embedding;
        if vector.is_empty() {
            return Err(LlmError::MalformedResponse(
                "embedding vector is empty".to_string(),
            ));
        }
        Ok(vector)
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The single LLM client used by all services.
/// Wraps the OpenAI chat and embedding APIs with retry logic and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Makes a chat-completion call, returning the full response object.
    /// Retries on 429 (rate limit), 5xx and transport errors with exponential backoff.
    pub async fn chat(
        &self,
        system: &str,
        prompt: &str,
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response: ChatResponse = self
            .post_json("chat/completions", &request_body, MAX_RETRIES)
            .await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Chat call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(response)
    }

    /// Calls the chat API and returns the trimmed text of the first choice.
    pub async fn chat_text(
        &self,
        system: &str,
        prompt: &str,
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        let response = self.chat(system, prompt, options).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    /// Convenience method that calls the chat API and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn chat_json<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: &str,
        options: ChatOptions,
    ) -> Result<T, LlmError> {
        let text = self.chat_text(system, prompt, options).await?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(&text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }

    /// Computes an embedding for `text`. Single attempt: retry policy belongs to callers.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let request_body = EmbeddingRequest {
            model: EMBEDDING_MODEL,
            input: text,
        };

        let response: EmbeddingResponse = self.post_json("embeddings", &request_body, 1).await?;
        let vector = response.into_single_vector()?;

        debug!("Embedding call succeeded: dimensions={}", vector.len());
        Ok(vector)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B, max_attempts: u32) -> Result<R, LlmError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;
        let url = self.endpoint(path);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: provider_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: provider_message(body),
                });
            }

            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes).map_err(LlmError::Parse);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: max_attempts,
        }))
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn provider_message(body: String) -> String {
    serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
