//! SQLite persistence for projects, outlines, generated content and task logs.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Tables the application cannot run without.
pub const REQUIRED_TABLES: [&str; 4] = ["projects", "outlines", "chapter_contents", "task_logs"];

/// Create a connection pool from a database URL.
///
/// Foreign keys are switched on for every connection so deleting a project
/// cascades to its outline, content and logs.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    tracing::debug!(database_url, max_connections = 5, "SQLite pool opened");
    Ok(pool)
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("../../db/migrations");
    tracing::debug!(count = migrator.iter().count(), "Applying migrations");
    migrator.run(pool).await
}

/// Names of [`REQUIRED_TABLES`] that do not exist yet.
pub async fn missing_tables(pool: &DbPool) -> Result<Vec<&'static str>, sqlx::Error> {
    let existing: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(pool)
            .await?;

    let missing: Vec<&'static str> = REQUIRED_TABLES
        .into_iter()
        .filter(|table| !existing.iter().any(|(name,)| name == table))
        .collect();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Required tables are missing");
    }
    Ok(missing)
}
