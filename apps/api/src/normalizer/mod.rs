//! Response Normalizer: reconciles free-text model output into a structured
//! value or a well-defined degraded outcome.
//!
//! The model has no binding output-format guarantee. Every reply ends up as
//! exactly one of:
//! - `Structured(T)`: a candidate was found, repaired, parsed and validated;
//! - `PartiallyInvalid(raw)`: a candidate was found but could not be turned into `T`;
//! - `NoStructuredContent(raw)`: nothing JSON-shaped was found.
//!
//! The degraded variants always carry the raw reply verbatim so callers can
//! hand it back for manual inspection.

pub mod candidate;
pub mod repair;
pub mod schema;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::normalizer::candidate::find_candidate;
use crate::normalizer::repair::strip_trailing_commas;
pub use crate::normalizer::schema::ResponseSchema;
use crate::normalizer::schema::{clamp_scores, missing_required_key};

/// Result of normalizing one model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    Structured(T),
    PartiallyInvalid(String),
    NoStructuredContent(String),
}

/// Wire tag telling the caller which outcome occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    Structured,
    PartiallyInvalid,
    NoStructuredContent,
}

impl<T> Normalized<T> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Normalized::Structured(_) => OutcomeKind::Structured,
            Normalized::PartiallyInvalid(_) => OutcomeKind::PartiallyInvalid,
            Normalized::NoStructuredContent(_) => OutcomeKind::NoStructuredContent,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Normalized<U> {
        match self {
            Normalized::Structured(t) => Normalized::Structured(f(t)),
            Normalized::PartiallyInvalid(raw) => Normalized::PartiallyInvalid(raw),
            Normalized::NoStructuredContent(raw) => Normalized::NoStructuredContent(raw),
        }
    }

    /// Raw model text carried by the degraded outcomes.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Normalized::Structured(_) => None,
            Normalized::PartiallyInvalid(raw) | Normalized::NoStructuredContent(raw) => Some(raw),
        }
    }
}

/// Normalizes a raw model reply against schema `T`.
pub fn normalize<T: ResponseSchema>(raw: &str) -> Normalized<T> {
    let Some(candidate) = find_candidate(raw) else {
        debug!("No JSON candidate in model reply ({} chars)", raw.len());
        return Normalized::NoStructuredContent(raw.to_string());
    };

    let repaired = strip_trailing_commas(candidate);
    if repaired.len() != candidate.len() {
        debug!("Removed trailing commas from JSON candidate");
    }

    let mut value: Value = match serde_json::from_str(&repaired) {
        Ok(v) => v,
        Err(e) => {
            warn!("Model JSON still invalid after repair: {e}");
            return Normalized::PartiallyInvalid(raw.to_string());
        }
    };

    if !value.is_object() {
        warn!("Model JSON is not an object");
        return Normalized::PartiallyInvalid(raw.to_string());
    }

    if let Some(key) = missing_required_key(&value, T::REQUIRED_KEYS) {
        warn!("Model JSON is missing required key '{key}'");
        return Normalized::PartiallyInvalid(raw.to_string());
    }

    clamp_scores(&mut value, T::SCORE_FIELDS);

    match serde_json::from_value::<T>(value) {
        Ok(parsed) => Normalized::Structured(parsed),
        Err(e) => {
            warn!("Model JSON does not match the expected shape: {e}");
            Normalized::PartiallyInvalid(raw.to_string())
        }
    }
}

/// Normalizes a prose reply: trims it and unwraps a single enclosing code
/// fence when the whole reply is fenced.
pub fn clean_prose(raw: &str) -> String {
    let trimmed = raw.trim();
    let unfenced = trimmed
        .strip_prefix("```")
        .and_then(|s| s.strip_suffix("```"))
        .map(|inner| match inner.split_once('\n') {
            // drop an info string such as ```text
            Some((label, body)) if is_fence_label(label) => body,
            _ => inner,
        });
    unfenced.unwrap_or(trimmed).trim().to_string()
}

/// A fence info string: empty or a plain language tag like `text` or `c++`.
fn is_fence_label(label: &str) -> bool {
    label
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
}
