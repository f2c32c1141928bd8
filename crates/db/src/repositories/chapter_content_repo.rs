//! Repository for the `chapter_contents` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use texbook_core::types::new_id;

use crate::models::chapter_content::{ChapterContent, UpsertChapterContent};

const COLUMNS: &str =
    "id, outline_id, content, exercises, status, word_count, created_at, updated_at";

pub struct ChapterContentRepo;

impl ChapterContentRepo {
    pub async fn find_by_outline(
        pool: &SqlitePool,
        outline_id: &str,
    ) -> Result<Option<ChapterContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chapter_contents WHERE outline_id = ?1");
        sqlx::query_as::<_, ChapterContent>(&query)
            .bind(outline_id)
            .fetch_optional(pool)
            .await
    }

    /// Content rows for every outline item of a project.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: &str,
    ) -> Result<Vec<ChapterContent>, sqlx::Error> {
        let query = "SELECT c.id, c.outline_id, c.content, c.exercises, c.status, c.word_count,
                            c.created_at, c.updated_at
                     FROM chapter_contents c
                     JOIN outlines o ON o.id = c.outline_id
                     WHERE o.project_id = ?1";
        sqlx::query_as::<_, ChapterContent>(query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Insert content for an item, or replace the existing row. The row id
    /// and `created_at` survive a replace.
    pub async fn upsert(
        pool: &SqlitePool,
        input: &UpsertChapterContent,
    ) -> Result<ChapterContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO chapter_contents
                (id, outline_id, content, exercises, status, word_count, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             ON CONFLICT (outline_id) DO UPDATE SET
                content = excluded.content,
                exercises = excluded.exercises,
                status = excluded.status,
                word_count = excluded.word_count,
                updated_at = excluded.updated_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChapterContent>(&query)
            .bind(new_id())
            .bind(&input.outline_id)
            .bind(&input.content)
            .bind(Json(&input.exercises))
            .bind(input.status.as_str())
            .bind(input.word_count)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }
}
