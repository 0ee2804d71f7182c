//! `SpeechSynthesizer` trait and the HTTP client for the synthesis function.
//!
//! The function takes `{text, voiceId}` and answers with raw audio bytes
//! (MIME `audio/mpeg`).  Voice synthesis itself happens entirely downstream;
//! this crate only carries bytes.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SpeechConfig;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors from speech synthesis or playback.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("speech synthesis request timed out")]
    Timeout,

    /// The synthesis function answered with a non-success status.
    #[error("speech synthesis returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The returned bytes could not be decoded as audio.
    #[error("failed to decode synthesized audio: {0}")]
    Decode(String),

    /// The local audio output device is unavailable or playback failed.
    #[error("audio output error: {0}")]
    Output(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else {
            SpeechError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async interface to the text-to-speech synthesis function.
///
/// Implementors must be `Send + Sync` so they can be held behind an
/// `Arc<dyn SpeechSynthesizer>` and called from any task.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the given voice and return the audio bytes.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError>;
}

// Compile-time assertion: Box<dyn SpeechSynthesizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechSynthesizer>) {}
};

// ---------------------------------------------------------------------------
// ApiSynthesizer
// ---------------------------------------------------------------------------

/// HTTP client for the hosted text-to-speech function.
pub struct ApiSynthesizer {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl ApiSynthesizer {
    /// Build an `ApiSynthesizer` from application config, with the configured
    /// per-request timeout baked into the HTTP client.
    pub fn from_config(config: &SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ApiSynthesizer {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError> {
        let url = format!("{}/functions/v1/text-to-speech", self.config.base_url);

        let body = serde_json::json!({
            "text":    text,
            "voiceId": voice_id,
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_builds_without_panic() {
        let _synth = ApiSynthesizer::from_config(&SpeechConfig::default());
    }

    /// Verify that `ApiSynthesizer` is object-safe.
    #[test]
    fn synthesizer_is_object_safe() {
        let synth: Box<dyn SpeechSynthesizer> =
            Box::new(ApiSynthesizer::from_config(&SpeechConfig::default()));
        drop(synth);
    }

    #[test]
    fn backend_error_carries_status_and_message() {
        let err = SpeechError::Backend {
            status: 401,
            message: "bad key".into(),
        };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("bad key"));
    }
}
