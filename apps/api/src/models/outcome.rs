use serde::Serialize;

use crate::normalizer::{Normalized, OutcomeKind};

/// Messages for each normalizer outcome of one feature.
pub struct OutcomeMessages {
    pub structured: &'static str,
    pub partially_invalid: &'static str,
    pub no_structured_content: &'static str,
}

/// Body of an analyze or match response. Exactly one of `analysis` and
/// `raw_response` is present.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeResponse<T> {
    pub message: &'static str,
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl<T> OutcomeResponse<T> {
    pub fn new(normalized: Normalized<T>, messages: &OutcomeMessages) -> Self {
        let outcome = normalized.kind();
        match normalized {
            Normalized::Structured(value) => Self {
                message: messages.structured,
                outcome,
                analysis: Some(value),
                raw_response: None,
            },
            Normalized::PartiallyInvalid(raw) => Self {
                message: messages.partially_invalid,
                outcome,
                analysis: None,
                raw_response: Some(raw),
            },
            Normalized::NoStructuredContent(raw) => Self {
                message: messages.no_structured_content,
                outcome,
                analysis: None,
                raw_response: Some(raw),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const MESSAGES: OutcomeMessages = OutcomeMessages {
        structured: "ok",
        partially_invalid: "partial",
        no_structured_content: "none",
    };

    #[test]
    fn test_structured_carries_analysis_only() {
        let wire = serde_json::to_value(OutcomeResponse::new(
            Normalized::Structured(json!({"matchScore": 3})),
            &MESSAGES,
        ))
        .unwrap();
        assert_eq!(
            wire,
            json!({"message": "ok", "outcome": "structured", "analysis": {"matchScore": 3}})
        );
    }

    #[test]
    fn test_degraded_carries_raw_response_only() {
        let wire = serde_json::to_value(OutcomeResponse::<()>::new(
            Normalized::NoStructuredContent("no json here".to_string()),
            &MESSAGES,
        ))
        .unwrap();
        assert_eq!(
            wire,
            json!({"message": "none", "outcome": "noStructuredContent", "rawResponse": "no json here"})
        );

        let wire = serde_json::to_value(OutcomeResponse::<()>::new(
            Normalized::PartiallyInvalid("{bad".to_string()),
            &MESSAGES,
        ))
        .unwrap();
        assert_eq!(wire["outcome"], "partiallyInvalid");
        assert!(wire.get("analysis").is_none());
    }
}
