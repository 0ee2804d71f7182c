//! The summary request handler.
//!
//! Stateless request/response: `{text, format}` in, `{summary}` out, one
//! downstream chat-completion call per invocation.  Any failure collapses to
//! a generic 500 `{error}` for the caller; the typed cause stays in the
//! server log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::summary::SummaryFormat;

use super::AppContext;

/// Wire request for summary generation.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    /// Free-form source text.
    pub text: String,
    /// Format tag; unrecognized tags degrade to the bare prompt prefix.
    pub format: String,
}

/// `POST /functions/generate-summary`
pub async fn generate_summary(
    State(ctx): State<AppContext>,
    Json(request): Json<SummaryRequest>,
) -> Response {
    log::info!("generating summary: format={:?}", request.format);

    let format = SummaryFormat::parse(&request.format);
    if format.is_none() {
        log::warn!(
            "unrecognized summary format {:?}, using bare prompt",
            request.format
        );
    }

    match ctx.summarizer.summarize(&request.text, format).await {
        Ok(summary) => (StatusCode::OK, Json(json!({ "summary": summary }))).into_response(),
        Err(e) => {
            log::error!("generate-summary failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
