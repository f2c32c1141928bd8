//! Append-only task log entries.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use texbook_core::project::TaskRole;
use texbook_core::types::{DbId, Timestamp};

/// A row from the `task_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskLog {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub role: TaskRole,
    pub action: String,
    pub content: Option<String>,
    pub metadata: Option<Json<serde_json::Value>>,
    pub created_at: Timestamp,
}

/// DTO for appending a log entry.
#[derive(Debug, Clone)]
pub struct CreateTaskLog {
    pub project_id: DbId,
    pub role: TaskRole,
    pub action: String,
    pub content: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl CreateTaskLog {
    pub fn new(project_id: impl Into<DbId>, role: TaskRole, action: &str) -> Self {
        Self {
            project_id: project_id.into(),
            role,
            action: action.to_string(),
            content: None,
            metadata: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
