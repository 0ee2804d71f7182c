//! Core `Summarizer` trait and `ApiSummarizer` implementation.
//!
//! `ApiSummarizer` calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint.  All connection details come from [`LlmConfig`]; nothing is
//! hardcoded.  Exactly one downstream call is issued per invocation — no
//! streaming, no retries.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::LlmConfig;
use crate::summary::prompt::{PromptBuilder, SummaryFormat};

// ---------------------------------------------------------------------------
// SummaryError
// ---------------------------------------------------------------------------

/// Errors that can occur during summary generation.
///
/// Callers that only need the flat "operation failed" view can use
/// `to_string()`; the variants exist so that network failures, downstream
/// rejections and malformed responses stay distinguishable server-side.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("summary request timed out")]
    Timeout,

    /// The downstream service answered with a non-success status.
    #[error("completions API returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse completions response: {0}")]
    Parse(String),

    /// The completion carried no usable text content.
    #[error("completions API returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for SummaryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SummaryError::Timeout
        } else {
            SummaryError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Summarizer trait
// ---------------------------------------------------------------------------

/// Async trait for summary generation.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn Summarizer>`).
///
/// # Arguments
/// * `text`   – The paper text to summarize.
/// * `format` – Parsed format, or `None` for an unrecognized wire tag
///              (degrades to the bare prompt prefix).
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        format: Option<SummaryFormat>,
    ) -> Result<String, SummaryError>;
}

// Compile-time assertion: Box<dyn Summarizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Summarizer>) {}
};

// ---------------------------------------------------------------------------
// ApiSummarizer
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// The conversation is always exactly two messages: the system instruction
/// built by [`PromptBuilder`] and the user-supplied paper text.
pub struct ApiSummarizer {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: Option<String>,
}

impl ApiSummarizer {
    /// Build an `ApiSummarizer` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  The API key is resolved once at construction
    /// (environment variable wins over the config file).
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let api_key = config.resolved_api_key();

        Self {
            client,
            config: config.clone(),
            api_key,
        }
    }
}

#[async_trait]
impl Summarizer for ApiSummarizer {
    /// Send `text` to the configured endpoint and return the summary.
    ///
    /// The `Authorization: Bearer …` header is attached **only** when a
    /// non-empty API key was resolved — safe for local providers that
    /// require no authentication.
    async fn summarize(
        &self,
        text: &str,
        format: Option<SummaryFormat>,
    ) -> Result<String, SummaryError> {
        let system_msg = PromptBuilder::system_instruction(format);

        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": text       }
            ],
            "stream":      false,
            "temperature": self.config.temperature
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SummaryError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SummaryError::Parse(e.to_string()))?;

        let summary = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(SummaryError::EmptyResponse)?
            .trim()
            .to_string();

        if summary.is_empty() {
            return Err(SummaryError::EmptyResponse);
        }

        Ok(summary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
