//! Thin app API over the orchestrator.
//!
//! These handlers translate HTTP requests into orchestrator [`Command`]s and
//! read snapshots of the shared session state.  Commands are enqueued and
//! answered with `202 Accepted`; progress and notices are observed via
//! `GET /app/state`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::orchestrator::Command;
use crate::speech::VOICES;
use crate::summary::SummaryFormat;

use super::AppContext;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub format: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    #[serde(rename = "voiceId")]
    pub voice_id: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /app/upload` — store the paper and find similar ones.
pub async fn upload(State(ctx): State<AppContext>, Json(req): Json<UploadRequest>) -> Response {
    enqueue(&ctx, Command::UploadPaper(req.text)).await
}

/// `POST /app/summary` — generate a summary of the current paper text.
pub async fn generate(
    State(ctx): State<AppContext>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    enqueue(&ctx, Command::GenerateSummary(SummaryFormat::parse(&req.format))).await
}

/// `POST /app/speak` — synthesize and play `text` with the selected voice.
pub async fn speak(State(ctx): State<AppContext>, Json(req): Json<SpeakRequest>) -> Response {
    enqueue(&ctx, Command::Speak(req.text)).await
}

/// `PUT /app/voice` — change the selected voice.
pub async fn select_voice(
    State(ctx): State<AppContext>,
    Json(req): Json<VoiceRequest>,
) -> Response {
    enqueue(&ctx, Command::SelectVoice(req.voice_id)).await
}

/// `GET /app/state` — snapshot of the session state.
pub async fn session_state(State(ctx): State<AppContext>) -> Response {
    let snapshot = ctx.session.lock().unwrap().clone();
    Json(snapshot).into_response()
}

/// `GET /app/voices` — the fixed voice catalog.
pub async fn voices() -> Response {
    Json(VOICES).into_response()
}

/// `GET /app/papers` — up to the configured number of most recent papers.
pub async fn recent_papers(State(ctx): State<AppContext>) -> Response {
    match ctx.store.recent(ctx.recent_limit).await {
        Ok(papers) => Json(papers).into_response(),
        Err(e) => {
            log::error!("recent papers listing failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn enqueue(ctx: &AppContext, command: Command) -> Response {
    match ctx.commands.send(command).await {
        Ok(()) => (StatusCode::ACCEPTED, Json(json!({ "accepted": true }))).into_response(),
        Err(e) => {
            log::error!("orchestrator channel closed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "orchestrator unavailable" })),
            )
                .into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
