//! `PaperStore` trait and the HTTP client for the external paper backend.
//!
//! The backend exposes a single paper-processing function taking
//! `{paperText, operation}` with `operation ∈ {store, similar}`, plus a REST
//! listing of recently created papers.  This crate owns no paper state; the
//! backend is the source of truth.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::BackendConfig;
use crate::papers::model::Paper;

// ---------------------------------------------------------------------------
// PaperError
// ---------------------------------------------------------------------------

/// Errors from the paper backend.
#[derive(Debug, Error)]
pub enum PaperError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("paper backend request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("paper backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The response body could not be parsed as expected JSON.
    #[error("failed to parse paper backend response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for PaperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PaperError::Timeout
        } else {
            PaperError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// PaperStore trait
// ---------------------------------------------------------------------------

/// Async interface to the external paper backend.
///
/// Implementors must be `Send + Sync` so they can be held behind an
/// `Arc<dyn PaperStore>` and called from any task.
#[async_trait]
pub trait PaperStore: Send + Sync {
    /// Store `paper_text` in the backend.  The backend assigns the record's
    /// identity; nothing is returned beyond success.
    async fn store(&self, paper_text: &str) -> Result<(), PaperError>;

    /// Find papers similar to `paper_text`.  Records are consumed as-is,
    /// not validated.
    async fn find_similar(&self, paper_text: &str) -> Result<Vec<Paper>, PaperError>;

    /// Up to `limit` most-recently-created papers, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<Paper>, PaperError>;
}

// Compile-time assertion: Box<dyn PaperStore> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn PaperStore>) {}
};

// ---------------------------------------------------------------------------
// ApiPaperStore
// ---------------------------------------------------------------------------

/// HTTP client for the hosted paper-processing function.
pub struct ApiPaperStore {
    client: reqwest::Client,
    config: BackendConfig,
}

impl ApiPaperStore {
    /// Build an `ApiPaperStore` from application config, with the configured
    /// per-request timeout baked into the HTTP client.
    pub fn from_config(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Issue one `{paperText, operation}` call and return the raw JSON body.
    async fn process(&self, paper_text: &str, operation: &str) -> Result<serde_json::Value, PaperError> {
        let url = format!("{}/functions/v1/process-paper", self.config.base_url);

        let body = serde_json::json!({
            "paperText": paper_text,
            "operation": operation,
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaperError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PaperError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PaperStore for ApiPaperStore {
    async fn store(&self, paper_text: &str) -> Result<(), PaperError> {
        self.process(paper_text, "store").await?;
        Ok(())
    }

    async fn find_similar(&self, paper_text: &str) -> Result<Vec<Paper>, PaperError> {
        let json = self.process(paper_text, "similar").await?;
        serde_json::from_value(json).map_err(|e| PaperError::Parse(e.to_string()))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Paper>, PaperError> {
        let url = format!(
            "{}/rest/v1/papers?order=created_at.desc&limit={}",
            self.config.base_url, limit
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaperError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PaperError::Parse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
