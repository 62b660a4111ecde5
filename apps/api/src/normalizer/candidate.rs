//! Candidate location: which substring of a model reply is hypothesized to be JSON.

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Locates the JSON candidate in `raw`, first match wins:
/// 1. the inner content of a ```` ```json ```` fenced block (label case-insensitive);
/// 2. the span from the first `{` to the last `}`, inclusive.
pub fn find_candidate(raw: &str) -> Option<&str> {
    fenced_json(raw).or_else(|| brace_span(raw))
}

fn fenced_json(raw: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets identical to `raw`.
    let lower = raw.to_ascii_lowercase();
    let open = lower.find(FENCE_OPEN)?;
    let body_start = open + FENCE_OPEN.len();
    let body_len = raw[body_start..].find(FENCE_CLOSE)?;
    Some(raw[body_start..body_start + body_len].trim())
}

fn brace_span(raw: &str) -> Option<&str> {
    let first = raw.find('{')?;
    let last = raw.rfind('}')?;
    (last > first).then(|| &raw[first..=last])
}
