//! Repository for the `outlines` table.

use chrono::Utc;
use sqlx::SqlitePool;
use texbook_core::types::new_id;

use crate::models::outline::{CreateOutlineItem, Outline, UpdateOutlineItem};

const COLUMNS: &str =
    "id, project_id, parent_id, title, level, sort_order, content_generated, created_at, updated_at";

/// Provides CRUD operations for outline items.
pub struct OutlineRepo;

impl OutlineRepo {
    /// Insert a new item under `project_id`. Parent existence is the
    /// caller's concern; the foreign key only guarantees the row exists.
    pub async fn create(
        pool: &SqlitePool,
        project_id: &str,
        input: &CreateOutlineItem,
    ) -> Result<Outline, sqlx::Error> {
        let query = format!(
            "INSERT INTO outlines
                (id, project_id, parent_id, title, level, sort_order, content_generated, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Outline>(&query)
            .bind(new_id())
            .bind(project_id)
            .bind(&input.parent_id)
            .bind(&input.title)
            .bind(input.level.as_str())
            .bind(input.sort_order.unwrap_or(0))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Outline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM outlines WHERE id = ?1");
        sqlx::query_as::<_, Outline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item only if it belongs to `project_id`.
    pub async fn find_in_project(
        pool: &SqlitePool,
        project_id: &str,
        id: &str,
    ) -> Result<Option<Outline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM outlines WHERE id = ?1 AND project_id = ?2");
        sqlx::query_as::<_, Outline>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// All items of a project ordered by `sort_order`, ties in insertion order.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: &str,
    ) -> Result<Vec<Outline>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM outlines WHERE project_id = ?1 ORDER BY sort_order, rowid"
        );
        sqlx::query_as::<_, Outline>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Apply the non-`None` fields of `input`. `parent_id: Some(None)`
    /// clears the parent.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        input: &UpdateOutlineItem,
    ) -> Result<Option<Outline>, sqlx::Error> {
        let query = format!(
            "UPDATE outlines SET
                parent_id = CASE WHEN ?2 THEN ?3 ELSE parent_id END,
                title = COALESCE(?4, title),
                level = COALESCE(?5, level),
                sort_order = COALESCE(?6, sort_order),
                updated_at = ?7
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Outline>(&query)
            .bind(id)
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.clone().flatten())
            .bind(&input.title)
            .bind(input.level.map(|l| l.as_str()))
            .bind(input.sort_order)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Move an item: set parent and sibling position in one statement.
    pub async fn update_position(
        pool: &SqlitePool,
        id: &str,
        parent_id: Option<&str>,
        sort_order: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE outlines SET parent_id = ?2, sort_order = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(id)
        .bind(parent_id)
        .bind(sort_order)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_content_generated(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE outlines SET content_generated = 1, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an item; descendants and their content cascade.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM outlines WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        tracing::debug!(outline_id = id, rows = result.rows_affected(), "Outline item deleted");
        Ok(result.rows_affected() > 0)
    }
}
