//! Summary generation for the paper assistant.
//!
//! This module provides:
//! * [`Summarizer`] — async trait implemented by all summary backends.
//! * [`ApiSummarizer`] — OpenAI-compatible chat-completions client.
//! * [`PromptBuilder`] / [`SummaryFormat`] — system-instruction templates.
//! * [`SummaryError`] — error variants for summary operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use paper_assistant::config::AppConfig;
//! use paper_assistant::summary::{ApiSummarizer, Summarizer, SummaryFormat};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let summarizer = ApiSummarizer::from_config(&config.llm);
//!
//!     let summary = summarizer
//!         .summarize("Paper body …", Some(SummaryFormat::Abstract))
//!         .await
//!         .unwrap();
//!     println!("{}", summary);
//! }
//! ```

pub mod client;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiSummarizer, Summarizer, SummaryError};
pub use prompt::{PromptBuilder, SummaryFormat};
