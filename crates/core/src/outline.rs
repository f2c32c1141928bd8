//! Outline node domain types.
//!
//! An outline is a flat list of [`OutlineNode`]s that reference their parent
//! by id. Level and parent are edited independently, so a node's `level` is
//! a rendering hint and is never validated against its position in the tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of an outline or project title, in characters.
pub const MAX_TITLE_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// The three structural tiers of a textbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineLevel {
    Chapter,
    Section,
    Subsection,
}

impl OutlineLevel {
    pub const ALL: [OutlineLevel; 3] = [Self::Chapter, Self::Section, Self::Subsection];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::Subsection => "subsection",
        }
    }

    /// The LaTeX sectioning command emitted for this level.
    ///
    /// The level names coincide with the standard `book` class commands.
    pub fn latex_command(self) -> &'static str {
        self.as_str()
    }

    /// The level expected for direct children, or `None` for the leaf tier.
    pub fn child_level(self) -> Option<OutlineLevel> {
        match self {
            Self::Chapter => Some(Self::Section),
            Self::Section => Some(Self::Subsection),
            Self::Subsection => None,
        }
    }
}

impl fmt::Display for OutlineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlineLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chapter" => Ok(Self::Chapter),
            "section" => Ok(Self::Section),
            "subsection" => Ok(Self::Subsection),
            other => Err(CoreError::Validation(format!(
                "Invalid outline level '{other}'. Must be one of: chapter, section, subsection"
            ))),
        }
    }
}

impl TryFrom<String> for OutlineLevel {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One entry in a project's table of contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub id: DbId,
    pub project_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub level: OutlineLevel,
    pub sort_order: i64,
    pub content_generated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OutlineNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// One `{item_id, parent_id, sort_order}` tuple of a reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    #[serde(alias = "itemId")]
    pub item_id: DbId,
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<DbId>,
    #[serde(alias = "sortOrder")]
    pub sort_order: i64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a user-entered title: non-blank and at most [`MAX_TITLE_LEN`] chars.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Reject a node being made its own parent.
pub fn validate_not_self_parent(node_id: &str, parent_id: Option<&str>) -> Result<(), CoreError> {
    if parent_id == Some(node_id) {
        return Err(CoreError::Validation(format!(
            "Outline item {node_id} cannot be its own parent"
        )));
    }
    Ok(())
}
