//! Paper storage and similarity search (delegated to the external backend).
//!
//! This module provides:
//! * [`Paper`] — the backend's paper record, consumed leniently.
//! * [`PaperStore`] — async trait for the store / similar / recent operations.
//! * [`ApiPaperStore`] — HTTP client for the hosted backend function.
//! * [`PaperError`] — error variants for backend operations.

pub mod client;
pub mod model;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiPaperStore, PaperError, PaperStore};
pub use model::Paper;
