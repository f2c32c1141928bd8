//! Handlers for the `/projects` resource and its LaTeX header and logs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use texbook_core::error::CoreError;
use texbook_core::outline::validate_title;
use texbook_core::project::clamp_log_limit;
use texbook_core::types::DbId;
use texbook_db::models::project::{CreateProject, LatexHeader, Project, UpdateProject};
use texbook_db::models::task_log::TaskLog;
use texbook_db::repositories::{ProjectRepo, TaskLogRepo};
use texbook_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a project or fail with 404.
pub(crate) async fn ensure_project_exists(pool: &DbPool, id: &str) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    validate_title(&input.title)?;
    input.validate()?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = %project.id, title = %project.title, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ensure_project_exists(&state.pool, &id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    input.validate()?;

    let project = ProjectRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Outline items, generated content and task logs are removed with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, &id).await? {
        tracing::info!(project_id = %id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Project", id)))
    }
}

/// GET /api/v1/projects/{id}/latex-header
///
/// Returns the stored header, or an empty string when none is set.
pub async fn get_latex_header(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LatexHeader>>> {
    let project = ensure_project_exists(&state.pool, &id).await?;
    Ok(Json(DataResponse {
        data: LatexHeader {
            content: project.latex_header.unwrap_or_default(),
        },
    }))
}

/// PUT /api/v1/projects/{id}/latex-header
pub async fn update_latex_header(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LatexHeader>,
) -> AppResult<Json<DataResponse<LatexHeader>>> {
    if !ProjectRepo::set_latex_header(&state.pool, &id, &input.content).await? {
        return Err(AppError::Core(CoreError::not_found("Project", id)));
    }
    Ok(Json(DataResponse { data: input }))
}

/// GET /api/v1/projects/{id}/logs?limit=
pub async fn list_logs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<TaskLog>>>> {
    ensure_project_exists(&state.pool, &id).await?;
    let logs =
        TaskLogRepo::list_by_project(&state.pool, &id, clamp_log_limit(params.limit)).await?;
    Ok(Json(DataResponse { data: logs }))
}
