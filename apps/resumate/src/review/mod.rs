//! AI resume review: the single point of entry for all Claude API calls.
//!
//! One round trip per review: serialize the resume, send it with the review
//! prompt, parse the returned JSON into suggestions, and validate each
//! suggestion's field path against the patch grammar before it reaches the
//! session. Suggestions with unparseable paths are dropped, not fatal.

pub mod prompts;
pub mod serialize;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::patch::ledger::AiSuggestion;
use crate::patch::FieldPath;
use crate::review::prompts::{REVIEW_PROMPT_TEMPLATE, REVIEW_SYSTEM};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Hardcoded to prevent accidental drift between environments.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model returned empty content")]
    Empty,

    #[error("rate limited after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The JSON shape the review prompt asks for.
#[derive(Debug, Deserialize)]
struct ReviewOutput {
    suggestions: Vec<AiSuggestion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait + Anthropic implementation
// ────────────────────────────────────────────────────────────────────────────

/// Source of review suggestions. The session depends on this trait so tests
/// can substitute a scripted backend.
#[async_trait]
pub trait SuggestionBackend: Send + Sync {
    async fn review(&self, resume_text: &str) -> Result<Vec<AiSuggestion>, ReviewError>;
}

pub struct AnthropicReviewer {
    client: Client,
    api_key: String,
}

impl AnthropicReviewer {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key,
        }
    }

    /// Calls the Messages API with retry on 429/5xx and exponential backoff.
    async fn call(&self, prompt: &str) -> Result<AnthropicResponse, ReviewError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: REVIEW_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<ReviewError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s.
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "review call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ReviewError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("review API returned {}: {}", status, body);
                last_error = Some(ReviewError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(ReviewError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: AnthropicResponse = response.json().await?;
            debug!(
                input_tokens = parsed.usage.input_tokens,
                output_tokens = parsed.usage.output_tokens,
                "review call succeeded"
            );
            return Ok(parsed);
        }

        Err(last_error.unwrap_or(ReviewError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl SuggestionBackend for AnthropicReviewer {
    async fn review(&self, resume_text: &str) -> Result<Vec<AiSuggestion>, ReviewError> {
        let prompt = REVIEW_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let response = self.call(&prompt).await?;
        let text = response.text().ok_or(ReviewError::Empty)?;
        parse_suggestions(text)
    }
}

/// Parses the model's JSON output, stripping code fences and dropping any
/// suggestion whose field path does not survive the patch grammar. A first
/// parse failure gets one recovery attempt with typographic quotes
/// normalized before the response is declared malformed.
pub fn parse_suggestions(text: &str) -> Result<Vec<AiSuggestion>, ReviewError> {
    let text = strip_json_fences(text);
    let output: ReviewOutput = match serde_json::from_str(text) {
        Ok(output) => output,
        Err(first_err) => {
            let repaired = normalize_quotes(text);
            match serde_json::from_str(&repaired) {
                Ok(output) => {
                    debug!("review JSON parsed after quote normalization");
                    output
                }
                Err(_) => return Err(ReviewError::Malformed(first_err)),
            }
        }
    };

    let suggestions = output
        .suggestions
        .into_iter()
        .filter(|s| match FieldPath::parse(&s.field) {
            Ok(_) => true,
            Err(e) => {
                warn!(field = %s.field, error = %e, "dropping suggestion with bad field path");
                false
            }
        })
        .collect();
    Ok(suggestions)
}

/// Replaces typographic quotes some model outputs slip into JSON keys.
fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
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
