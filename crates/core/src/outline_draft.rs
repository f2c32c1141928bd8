//! Outline drafts returned by the LLM for a free-text request.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::outline::OutlineLevel;

static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid json object regex"));

/// One entry of a drafted outline. Not persisted; the client reviews the
/// draft and creates items from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineDraft {
    pub title: String,
    pub level: OutlineLevel,
    #[serde(default)]
    pub children: Vec<OutlineDraft>,
}

#[derive(Debug, Deserialize)]
struct DraftEnvelope {
    outline: Vec<OutlineDraft>,
}

/// Pull the outermost JSON object out of a model reply and parse it as
/// `{"outline": [...]}`. Any prose around the object is ignored.
pub fn parse_outline_response(text: &str) -> Result<Vec<OutlineDraft>, CoreError> {
    let json = JSON_OBJECT_RE
        .find(text)
        .ok_or_else(|| CoreError::Validation("No JSON object found in outline response".into()))?;

    let envelope: DraftEnvelope = serde_json::from_str(json.as_str())
        .map_err(|e| CoreError::Validation(format!("Malformed outline response: {e}")))?;

    Ok(envelope.outline)
}

impl OutlineDraft {
    /// Number of entries in this subtree, including `self`.
    pub fn entry_count(&self) -> usize {
        1 + self.children.iter().map(OutlineDraft::entry_count).sum::<usize>()
    }
}
