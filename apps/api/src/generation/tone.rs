//! Style presets: maps the caller's template selector to a tone directive per feature.
//!
//! The selector is free text from the client. Anything that is not a known
//! preset falls back to `Standard`.

use serde::{Deserialize, Serialize};

use crate::generation::Feature;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    #[default]
    Standard,
    Modern,
    Creative,
}

impl StylePreset {
    /// Resolves a selector case-insensitively. Unknown or absent → `Standard`.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("modern") => StylePreset::Modern,
            Some("creative") => StylePreset::Creative,
            _ => StylePreset::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StylePreset::Standard => "standard",
            StylePreset::Modern => "modern",
            StylePreset::Creative => "creative",
        }
    }

    /// The tone directive injected into the prompt for `feature`.
    pub fn directive(self, feature: Feature) -> &'static str {
        match (feature, self) {
            (Feature::CoverLetter, StylePreset::Standard) => {
                "Write in a standard professional tone."
            }
            (Feature::CoverLetter, StylePreset::Modern) => {
                "Write in a confident, modern professional tone with strong action verbs."
            }
            (Feature::CoverLetter, StylePreset::Creative) => {
                "Write in a creative and engaging tone. Be expressive but remain professional."
            }
            (Feature::Match, StylePreset::Standard) => {
                "Phrase suggestions in a neutral, professional register."
            }
            (Feature::Match, StylePreset::Modern) => {
                "Phrase suggestions concisely, built around strong action verbs and measurable outcomes."
            }
            (Feature::Match, StylePreset::Creative) => {
                "Suggestions may propose distinctive framing that helps the candidate stand out, \
                 as long as they stay truthful to the resume."
            }
            (Feature::Analyze, StylePreset::Standard) => {
                "Evaluate the resume against conventional professional resume standards."
            }
            (Feature::Analyze, StylePreset::Modern) => {
                "Weigh clean structure, concise bullets and quantified impact heavily."
            }
            (Feature::Analyze, StylePreset::Creative) => {
                "Reward a distinctive voice and storytelling, provided the content stays clear and professional."
            }
        }
    }
}
