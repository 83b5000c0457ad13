//! Parsing packing suggestions out of free-form completions

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{Result, TripcastError};

/// Checklist and rationale produced by the language model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSuggestions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub checklist: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Turns completion text into [`PackingSuggestions`]
pub trait CompletionParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<PackingSuggestions>;
}

/// Accepts only a (possibly fenced) JSON object and fails otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictParser;

/// Salvages what it can and never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientParser;

impl CompletionParser for StrictParser {
    fn parse(&self, text: &str) -> Result<PackingSuggestions> {
        let cleaned = strip_code_fences(text);
        serde_json::from_str(&cleaned)
            .map_err(|e| TripcastError::parse(format!("Completion is not the expected JSON: {e}")))
    }
}

impl CompletionParser for LenientParser {
    fn parse(&self, text: &str) -> Result<PackingSuggestions> {
        let cleaned = strip_code_fences(text);

        if let Ok(parsed) = serde_json::from_str(&cleaned) {
            return Ok(parsed);
        }

        if let Some(parsed) = braced_span(&cleaned).and_then(|s| serde_json::from_str(s).ok()) {
            debug!("Recovered JSON object embedded in completion text");
            return Ok(parsed);
        }

        debug!("Completion has no parseable JSON, returning it as notes");
        Ok(PackingSuggestions {
            checklist: Vec::new(),
            notes: cleaned,
        })
    }
}

/// Remove Markdown fence markers (```` ```json ````, any case, and ```` ``` ````) and trim
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        if rest.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
            rest = rest[4..].trim_start();
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Text from the first `{` through the last `}`
fn braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
