//! Outline item model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use texbook_core::outline::{OutlineLevel, OutlineNode};
use texbook_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `outlines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Outline {
    pub id: DbId,
    pub project_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub level: OutlineLevel,
    pub sort_order: i64,
    pub content_generated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Outline> for OutlineNode {
    fn from(row: Outline) -> Self {
        OutlineNode {
            id: row.id,
            project_id: row.project_id,
            parent_id: row.parent_id,
            title: row.title,
            level: row.level,
            sort_order: row.sort_order,
            content_generated: row.content_generated,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating an outline item. `sort_order` defaults to 0.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOutlineItem {
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<DbId>,
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub level: OutlineLevel,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: Option<i64>,
}

/// DTO for updating an outline item.
///
/// `parent_id` is doubly optional: absent leaves the parent alone, `null`
/// moves the item to the top level.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOutlineItem {
    #[serde(default, alias = "parentId", deserialize_with = "deserialize_some")]
    pub parent_id: Option<Option<DbId>>,
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub level: Option<OutlineLevel>,
    #[serde(default, alias = "sortOrder")]
    pub sort_order: Option<i64>,
}

/// Distinguish an explicit `null` from a missing field.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
