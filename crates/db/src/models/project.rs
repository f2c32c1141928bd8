//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use texbook_core::project::{ProjectConfig, ProjectStatus};
use texbook_core::types::{DbId, Timestamp};
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub latex_header: Option<String>,
    pub config: Json<ProjectConfig>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[serde(default, alias = "latexHeader")]
    pub latex_header: Option<String>,
    /// Missing fields fall back to [`ProjectConfig::default`].
    #[serde(default)]
    pub config: Option<ProjectConfig>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    #[serde(default, alias = "latexHeader")]
    pub latex_header: Option<String>,
    pub config: Option<ProjectConfig>,
    pub status: Option<ProjectStatus>,
}

/// Body of `PUT /projects/{id}/latex-header`, also the shape returned by
/// the matching `GET`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatexHeader {
    pub content: String,
}
