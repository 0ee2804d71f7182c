//! Session state machine and shared application state.
//!
//! [`GenerationPhase`] drives the summary-generation state machine.  The
//! HTTP layer reads it via [`SharedState`] to report progress.
//!
//! [`SessionState`] is the single source of truth for the transient session:
//! current paper text, generated summary, generation phase, selected voice,
//! last similarity results and the most recent notice.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>` — cheap to
//! clone and safe to share across tasks.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::papers::Paper;

// ---------------------------------------------------------------------------
// GenerationPhase
// ---------------------------------------------------------------------------

/// States of the summary-generation session.
///
/// ```text
/// Idle ──generate──▶ Generating ──success──▶ Done
///                               ──failure──▶ Failed
/// Done / Failed ──generate──▶ Generating   (next request)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPhase {
    /// No generation has been requested yet in this session.
    #[default]
    Idle,

    /// A summarizer call is in flight.  Exactly one generation may be in
    /// this phase at a time; new requests are refused until it settles.
    Generating,

    /// The last generation completed and its summary is held in state.
    Done,

    /// The last generation failed; no summary is held.
    Failed,
}

impl GenerationPhase {
    /// Returns `true` while a generation is in flight.
    ///
    /// ```
    /// use paper_assistant::orchestrator::GenerationPhase;
    ///
    /// assert!(!GenerationPhase::Idle.is_busy());
    /// assert!(GenerationPhase::Generating.is_busy());
    /// assert!(!GenerationPhase::Done.is_busy());
    /// assert!(!GenerationPhase::Failed.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, GenerationPhase::Generating)
    }

    /// A short human-readable label for status display.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationPhase::Idle => "Idle",
            GenerationPhase::Generating => "Generating",
            GenerationPhase::Done => "Done",
            GenerationPhase::Failed => "Failed",
        }
    }
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Kind of a transient user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient, dismissible notification — the toast analog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success!".into(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".into(),
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Shared session state — the single source of truth for the HTTP layer.
///
/// Held behind [`SharedState`].  The orchestrator mutates it; handlers read
/// snapshots of it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Text of the most recently uploaded paper.
    ///
    /// `None` until the first upload.
    pub paper_text: Option<String>,

    /// Summary produced by the last successful generation.
    ///
    /// Only meaningful relative to the paper text that produced it — the
    /// orchestrator clears it whenever new paper text is set.
    pub summary: Option<String>,

    /// Current phase of the generation state machine.
    pub phase: GenerationPhase,

    /// Voice id used for speech synthesis.  Always one of the fixed voice
    /// catalog ids.
    pub selected_voice: String,

    /// Similarity results from the last upload.
    pub similar_papers: Vec<Paper>,

    /// Most recent notice posted by the orchestrator.
    pub last_notice: Option<Notice>,
}

impl SessionState {
    /// Create a fresh session with the given startup voice.
    pub fn new(selected_voice: impl Into<String>) -> Self {
        Self {
            paper_text: None,
            summary: None,
            phase: GenerationPhase::Idle,
            selected_voice: selected_voice.into(),
            similar_papers: Vec::new(),
            last_notice: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] wrapping a fresh [`SessionState`].
pub fn new_shared_state(selected_voice: impl Into<String>) -> SharedState {
    Arc::new(Mutex::new(SessionState::new(selected_voice)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
