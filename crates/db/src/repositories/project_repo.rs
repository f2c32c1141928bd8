//! Repository for the `projects` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use texbook_core::project::ProjectStatus;
use texbook_core::types::new_id;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, latex_header, config, status, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `draft` status, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let now = Utc::now();
        let config = input.config.clone().unwrap_or_default();
        let query = format!(
            "INSERT INTO projects (id, title, latex_header, config, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(new_id())
            .bind(&input.title)
            .bind(&input.latex_header)
            .bind(Json(config))
            .bind(ProjectStatus::Draft.as_str())
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently updated first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY updated_at DESC, rowid DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE(?2, title),
                latex_header = COALESCE(?3, latex_header),
                config = COALESCE(?4, config),
                status = COALESCE(?5, status),
                updated_at = ?6
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.latex_header)
            .bind(input.config.clone().map(Json))
            .bind(input.status.map(ProjectStatus::as_str))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Set the lifecycle status. Returns `true` if the project exists.
    pub async fn set_status(
        pool: &SqlitePool,
        id: &str,
        status: ProjectStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored LaTeX header. An empty string is stored as-is and
    /// makes exports fall back to the built-in preamble.
    pub async fn set_latex_header(
        pool: &SqlitePool,
        id: &str,
        header: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET latex_header = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(header)
                .bind(Utc::now())
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project. Outline items, content and logs cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
