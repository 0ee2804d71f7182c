//! Text-to-speech: synthesis client, voice catalog and local playback.
//!
//! This module provides:
//! * [`SpeechSynthesizer`] — async trait for the synthesis function.
//! * [`ApiSynthesizer`] — HTTP client posting `{text, voiceId}`.
//! * [`Playback`] / [`RodioPlayback`] / [`NullPlayback`] — audio output.
//! * [`VOICES`] / [`voice_name`] — the fixed voice catalog.
//! * [`SpeechError`] — error variants for synthesis and playback.

pub mod client;
pub mod playback;
pub mod voices;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiSynthesizer, SpeechError, SpeechSynthesizer};
pub use playback::{NullPlayback, Playback, RodioPlayback};
pub use voices::{is_known_voice, voice_name, Voice, VOICES};
