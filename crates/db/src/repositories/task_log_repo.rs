//! Repository for the append-only `task_logs` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use texbook_core::types::new_id;

use crate::models::task_log::{CreateTaskLog, TaskLog};

const COLUMNS: &str = "id, project_id, role, action, content, metadata, created_at";

pub struct TaskLogRepo;

impl TaskLogRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateTaskLog) -> Result<TaskLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_logs (id, project_id, role, action, content, metadata, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskLog>(&query)
            .bind(new_id())
            .bind(&input.project_id)
            .bind(input.role.as_str())
            .bind(&input.action)
            .bind(&input.content)
            .bind(input.metadata.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Newest entries first, at most `limit` of them.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: &str,
        limit: i64,
    ) -> Result<Vec<TaskLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_logs
             WHERE project_id = ?1
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2"
        );
        sqlx::query_as::<_, TaskLog>(&query)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
