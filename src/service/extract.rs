//! Verdict extraction from free-form model replies
//!
//! The model is instructed to answer with JSON only, but replies still arrive
//! wrapped in markdown fencing or a short prose preamble. Extraction is
//! two-stage: prefer the content of a triple-backtick fenced block, fall back
//! to the whole trimmed text, then decode strictly. Genuinely unparseable
//! output is rejected, never repaired.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::ClassificationVerdict;

/// Matches a fenced code block, optionally tagged `json`
fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid fence pattern"))
}

/// Decode a `ClassificationVerdict` from raw model reply text
///
/// Returns the decode error text on failure so the caller can surface it as a
/// malformed-response diagnostic. A `status` outside halal/haram/unknown and
/// missing required fields are decode errors, not defaults.
pub fn extract_verdict(text: &str) -> Result<ClassificationVerdict, String> {
    let candidate = match fence_regex().captures(text) {
        Some(captures) => captures[1].trim().to_string(),
        None => text.trim().to_string(),
    };

    let verdict: ClassificationVerdict =
        serde_json::from_str(&candidate).map_err(|e| e.to_string())?;

    Ok(verdict.normalize())
}
