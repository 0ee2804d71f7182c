//! Orchestration of the upload → similarity → summary → speech flows.
//!
//! [`Orchestrator`] sequences the user-triggered remote operations and holds
//! their transient results in [`SessionState`] behind [`SharedState`].
//! Commands arrive over a `tokio::sync::mpsc` channel (see [`Command`]);
//! the HTTP layer is the producer.

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{Command, Orchestrator};
pub use state::{
    new_shared_state, GenerationPhase, Notice, NoticeKind, SessionState, SharedState,
};
