//! Prompt builder for research-paper summaries.
//!
//! [`PromptBuilder`] constructs the system instruction sent alongside the
//! user-supplied paper text.  The instruction is a fixed prefix plus a
//! per-format suffix selected by [`SummaryFormat`].
//!
//! Format tags arriving over the wire are parsed leniently: an unrecognized
//! tag degrades to the bare prefix with no distinguishing instruction
//! appended, rather than being rejected.

// ---------------------------------------------------------------------------
// Instruction fragments
// ---------------------------------------------------------------------------

/// Common prefix for every summary request.
const PROMPT_PREFIX: &str = "Summarize the following research paper:\n\n";

/// Short abstract-style summary.
const SUFFIX_ABSTRACT: &str = "Provide a concise abstract-style summary.";

/// One-page detailed summary.
const SUFFIX_FULL: &str = "Provide a detailed one-page summary covering key points.";

/// Text-based flowchart of the paper's concepts.
const SUFFIX_FLOWCHART: &str =
    "Create a text-based flowchart showing the main concepts and their relationships.";

// ---------------------------------------------------------------------------
// SummaryFormat
// ---------------------------------------------------------------------------

/// The three recognized summary styles.
///
/// Wire tags are the lowercase variant names (`"abstract"`, `"full"`,
/// `"flowchart"`).  Anything else is not a valid format; see
/// [`SummaryFormat::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Concise abstract-style summary.
    Abstract,
    /// Detailed one-page summary.
    Full,
    /// Text-based flowchart of concepts and relationships.
    Flowchart,
}

impl SummaryFormat {
    /// Parse a wire tag into a format.  Returns `None` for unrecognized tags
    /// — callers decide whether that means "bare prompt" (the handler) or
    /// "refuse" (nothing does today).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "abstract" => Some(Self::Abstract),
            "full" => Some(Self::Full),
            "flowchart" => Some(Self::Flowchart),
            _ => None,
        }
    }

    /// The wire tag for this format.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Full => "full",
            Self::Flowchart => "flowchart",
        }
    }
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the system instruction for a summary request.
///
/// # Example
/// ```rust
/// use paper_assistant::summary::{PromptBuilder, SummaryFormat};
///
/// let instruction = PromptBuilder::system_instruction(Some(SummaryFormat::Abstract));
/// assert!(instruction.starts_with("Summarize the following research paper:"));
/// ```
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the system instruction: fixed prefix + per-format suffix.
    ///
    /// `None` (unrecognized wire tag) yields the bare prefix only.
    pub fn system_instruction(format: Option<SummaryFormat>) -> String {
        let mut prompt = String::with_capacity(128);
        prompt.push_str(PROMPT_PREFIX);
        match format {
            Some(SummaryFormat::Abstract) => prompt.push_str(SUFFIX_ABSTRACT),
            Some(SummaryFormat::Full) => prompt.push_str(SUFFIX_FULL),
            Some(SummaryFormat::Flowchart) => prompt.push_str(SUFFIX_FLOWCHART),
            None => {}
        }
        prompt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
