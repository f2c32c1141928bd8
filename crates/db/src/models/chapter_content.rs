//! Generated content for one outline item.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use texbook_core::exercises::Exercise;
use texbook_core::project::ContentStatus;
use texbook_core::types::{DbId, Timestamp};

/// A row from the `chapter_contents` table. At most one per outline item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChapterContent {
    pub id: DbId,
    pub outline_id: DbId,
    pub content: Option<String>,
    pub exercises: Json<Vec<Exercise>>,
    #[sqlx(try_from = "String")]
    pub status: ContentStatus,
    pub word_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by [`ChapterContentRepo::upsert`](crate::repositories::ChapterContentRepo::upsert).
#[derive(Debug, Clone)]
pub struct UpsertChapterContent {
    pub outline_id: DbId,
    pub content: Option<String>,
    pub exercises: Vec<Exercise>,
    pub status: ContentStatus,
    pub word_count: i64,
}
