// Prompt construction for the AI features (match, analyze, cover letter).
// Model calls go through `invoke::ask_model`; everything else here is pure.

pub mod builder;
pub mod invoke;
pub mod prompts;
pub mod tone;

use serde::{Deserialize, Serialize};

pub use builder::{build_prompt, PromptContext, PromptError};
pub use invoke::ask_model;
pub use tone::StylePreset;

/// The AI-backed features. Wire names: `match`, `analyze`, `cover-letter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Match,
    Analyze,
    CoverLetter,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Match => "match",
            Feature::Analyze => "analyze",
            Feature::CoverLetter => "cover-letter",
        }
    }

    /// Structured features ask for strict JSON; the rest ask for prose.
    pub fn expects_json(self) -> bool {
        !matches!(self, Feature::CoverLetter)
    }
}
