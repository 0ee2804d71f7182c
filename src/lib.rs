//! Research-paper assistant.
//!
//! Callers submit paper text; the assistant stores it in an external paper
//! backend, finds similar papers, generates AI summaries in selectable
//! formats via an external chat-completions API, and converts text to speech
//! via an external synthesis function.
//!
//! # Modules
//!
//! * [`config`] — settings structs, TOML persistence, platform paths.
//! * [`summary`] — prompt templates and the chat-completions client.
//! * [`papers`] — paper records and the backend store client.
//! * [`speech`] — voice catalog, synthesis client and local playback.
//! * [`orchestrator`] — sequences the user-triggered flows and holds the
//!   transient session state.
//! * [`server`] — the HTTP surface (summary handler + thin app API).

pub mod config;
pub mod orchestrator;
pub mod papers;
pub mod server;
pub mod speech;
pub mod summary;
