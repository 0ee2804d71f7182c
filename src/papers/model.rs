//! Paper record as returned by the external backend.
//!
//! Records are created by the backend's store operation and are read-only
//! from this crate's perspective — never mutated or deleted here.  Fields
//! beyond the basics are optional because backend responses are consumed
//! leniently rather than validated.

use serde::{Deserialize, Serialize};

/// Metadata for a research paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Opaque identifier assigned by the backend store.
    #[serde(default)]
    pub id: Option<String>,

    /// Paper title.
    pub title: String,

    /// List of author names.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Journal or venue of publication.
    #[serde(default)]
    pub journal: Option<String>,

    /// Year of publication.
    #[serde(default)]
    pub year: Option<i32>,

    /// Abstract text.
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,

    /// Similarity score (0.0 – 1.0), present only on similarity-search
    /// results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,

    /// Citation count, when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u32>,

    /// Reference count, when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_count: Option<u32>,

    /// Download count, when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u32>,
}

impl Paper {
    /// Similarity as a percentage string for display (e.g. `"87.3% match"`),
    /// or `None` when the record carries no score.
    pub fn similarity_label(&self) -> Option<String> {
        self.similarity
            .map(|s| format!("{:.1}% match", (s * 100.0).clamp(0.0, 100.0)))
    }
}
