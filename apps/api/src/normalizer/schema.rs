use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Inclusive bounds for every score the model is asked to produce.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Structural contract of a structured AI response.
///
/// Optional keys are modelled as `Option<_>` on the implementing type so an
/// absent key deserializes to `None`, never to a zero value.
pub trait ResponseSchema: DeserializeOwned {
    /// Top-level keys that must be present and non-null.
    const REQUIRED_KEYS: &'static [&'static str];
    /// JSON pointers of score fields bounded to `[SCORE_MIN, SCORE_MAX]`.
    const SCORE_FIELDS: &'static [&'static str];
}

/// Returns the first required key that is absent or null.
pub fn missing_required_key(value: &Value, required: &[&'static str]) -> Option<&'static str> {
    required
        .iter()
        .copied()
        .find(|key| value.get(*key).map_or(true, Value::is_null))
}

/// Clamps each numeric score field into range and rounds it to an integer.
/// Non-numeric values are left for typed deserialization to reject.
pub fn clamp_scores(value: &mut Value, pointers: &[&str]) {
    for pointer in pointers {
        let Some(slot) = value.pointer_mut(pointer) else {
            continue;
        };
        let Some(n) = slot.as_f64() else {
            continue;
        };

        let bounded = n.clamp(SCORE_MIN, SCORE_MAX);
        if bounded != n {
            warn!("Model returned out-of-range score {pointer}={n}; clamping to {bounded}");
        }
        let rounded = bounded.round();
        if rounded != bounded {
            debug!("Rounding fractional score {pointer}={bounded} to {rounded}");
        }
        *slot = Value::from(rounded as u64);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const POINTERS: &[&str] = &["/score", "/nested/inner"];

    #[test]
    fn test_clamp_high_and_low() {
        let mut v = json!({"score": 140, "nested": {"inner": -5}});
        clamp_scores(&mut v, POINTERS);
        assert_eq!(v, json!({"score": 100, "nested": {"inner": 0}}));
    }

    #[test]
    fn test_in_range_values_unchanged() {
        let mut v = json!({"score": 0, "nested": {"inner": 100}});
        clamp_scores(&mut v, POINTERS);
        assert_eq!(v, json!({"score": 0, "nested": {"inner": 100}}));
    }

    #[test]
    fn test_fractions_are_rounded() {
        let mut v = json!({"score": 72.6, "nested": {"inner": 100.4}});
        clamp_scores(&mut v, POINTERS);
        assert_eq!(v, json!({"score": 73, "nested": {"inner": 100}}));
    }

    #[test]
    fn test_absent_and_non_numeric_fields_untouched() {
        let mut v = json!({"score": "high"});
        clamp_scores(&mut v, POINTERS);
        assert_eq!(v, json!({"score": "high"}));
        assert!(v.pointer("/nested/inner").is_none());
    }

    #[test]
    fn test_missing_required_key_treats_null_as_missing() {
        let v = json!({"a": 1, "b": null});
        assert_eq!(missing_required_key(&v, &["a"]), None);
        assert_eq!(missing_required_key(&v, &["a", "b"]), Some("b"));
        assert_eq!(missing_required_key(&v, &["c"]), Some("c"));
    }
}
