//! Textual repair applied to a JSON candidate before parsing.
//!
//! The only repair is dropping trailing commas before `}` or `]`. Anything
//! else the model got wrong is left for the parser to reject.

/// Removes every comma that is followed (after optional whitespace) by `}` or
/// `]`. Commas inside string literals are left alone.
pub fn strip_trailing_commas(candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in candidate.char_indices() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' if closes_next(&candidate[idx + 1..]) => {}
            _ => out.push(ch),
        }
    }

    out
}

fn closes_next(rest: &str) -> bool {
    matches!(rest.trim_start().chars().next(), Some('}') | Some(']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_trailing_comma() {
        assert_eq!(strip_trailing_commas(r#"{"a": 1,}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_array_trailing_comma_with_whitespace() {
        assert_eq!(
            strip_trailing_commas("{\"k\": [\"Go\", \"SQL\",\n  ]\n}"),
            "{\"k\": [\"Go\", \"SQL\"\n  ]\n}"
        );
    }

    #[test]
    fn test_nested_trailing_commas() {
        let repaired = strip_trailing_commas(r#"{"a": {"b": [1, 2,],}, }"#);
        assert_eq!(repaired, r#"{"a": {"b": [1, 2]} }"#);
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }

    #[test]
    fn test_commas_inside_strings_untouched() {
        let input = r#"{"tip": "add metrics, }", "x": "a\",]"}"#;
        assert_eq!(strip_trailing_commas(input), input);
    }

    #[test]
    fn test_valid_json_unchanged() {
        let input = r#"{"a": [1, 2], "b": {"c": "d"}}"#;
        assert_eq!(strip_trailing_commas(input), input);
    }

    #[test]
    fn test_missing_comma_is_not_repaired() {
        let input = r#"{"k": ["Python" "Redux"]}"#;
        assert_eq!(strip_trailing_commas(input), input);
    }
}
