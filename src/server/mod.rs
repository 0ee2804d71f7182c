//! HTTP surface: the summary request handler plus the thin app API that
//! drives the orchestrator.
//!
//! Every response carries permissive CORS headers (allow-origin `*`,
//! allow-headers `authorization, x-client-info, apikey, content-type`);
//! preflight OPTIONS requests are short-circuited by the CORS layer.

pub mod app_api;
pub mod summary_api;

use std::sync::Arc;

use axum::http::{header, HeaderName};
use axum::routing::{get, post, put};
use axum::Router;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};

use crate::orchestrator::{Command, SharedState};
use crate::papers::PaperStore;
use crate::summary::Summarizer;

// ---------------------------------------------------------------------------
// AppContext
// ---------------------------------------------------------------------------

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppContext {
    /// Summary backend used by the request handler.
    pub summarizer: Arc<dyn Summarizer>,
    /// Paper backend used by the recent-papers listing.
    pub store: Arc<dyn PaperStore>,
    /// Session state mutated by the orchestrator.
    pub session: SharedState,
    /// Command channel into the orchestrator.
    pub commands: mpsc::Sender<Command>,
    /// Number of records returned by the recent-papers listing.
    pub recent_limit: usize,
}

// ---------------------------------------------------------------------------
// Router construction
// ---------------------------------------------------------------------------

/// Permissive CORS: any origin, the fixed header allow-list.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Build the full application router.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // The edge-function analog: stateless summary generation.
        .route(
            "/functions/generate-summary",
            post(summary_api::generate_summary),
        )
        // Thin app API over the orchestrator.
        .route("/app/upload", post(app_api::upload))
        .route("/app/summary", post(app_api::generate))
        .route("/app/speak", post(app_api::speak))
        .route("/app/voice", put(app_api::select_voice))
        .route("/app/state", get(app_api::session_state))
        .route("/app/voices", get(app_api::voices))
        .route("/app/papers", get(app_api::recent_papers))
        .layer(cors_layer())
        .with_state(ctx)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
