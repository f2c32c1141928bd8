//! Handlers for `/projects/{id}/outline`.
//!
//! Parent changes are checked against the project's current outline:
//! a parent must exist in the same project, and no change may make an item
//! its own ancestor.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use texbook_core::error::CoreError;
use texbook_core::outline::{validate_not_self_parent, validate_title, OutlineNode, ReorderEntry};
use texbook_core::outline_tree::{apply_reorder, build_tree, would_create_cycle, OutlineTreeNode};
use texbook_core::types::DbId;
use texbook_db::models::outline::{CreateOutlineItem, Outline, UpdateOutlineItem};
use texbook_db::repositories::OutlineRepo;
use texbook_db::DbPool;
use validator::Validate;

use super::project::ensure_project_exists;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /projects/{id}/outline/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub updates: Vec<ReorderEntry>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: usize,
}

async fn load_nodes(pool: &DbPool, project_id: &str) -> AppResult<Vec<OutlineNode>> {
    Ok(OutlineRepo::list_by_project(pool, project_id)
        .await?
        .into_iter()
        .map(OutlineNode::from)
        .collect())
}

async fn ensure_item_exists(pool: &DbPool, project_id: &str, item_id: &str) -> AppResult<Outline> {
    OutlineRepo::find_in_project(pool, project_id, item_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("OutlineItem", item_id)))
}

fn foreign_parent(parent_id: &str) -> AppError {
    CoreError::Validation(format!(
        "Parent outline item {parent_id} does not belong to this project"
    ))
    .into()
}

fn ensure_parent_in_project(nodes: &[OutlineNode], parent_id: &str) -> AppResult<()> {
    if nodes.iter().any(|n| n.id == parent_id) {
        Ok(())
    } else {
        Err(foreign_parent(parent_id))
    }
}

/// GET /api/v1/projects/{id}/outline
///
/// Flat list ordered by `sort_order`, ties in insertion order.
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Outline>>>> {
    ensure_project_exists(&state.pool, &project_id).await?;
    let items = OutlineRepo::list_by_project(&state.pool, &project_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/projects/{id}/outline/tree
pub async fn tree(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<OutlineTreeNode>>>> {
    ensure_project_exists(&state.pool, &project_id).await?;
    let nodes = load_nodes(&state.pool, &project_id).await?;
    Ok(Json(DataResponse {
        data: build_tree(&nodes),
    }))
}

/// POST /api/v1/projects/{id}/outline/items
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateOutlineItem>,
) -> AppResult<(StatusCode, Json<DataResponse<Outline>>)> {
    validate_title(&input.title)?;
    input.validate()?;
    ensure_project_exists(&state.pool, &project_id).await?;

    if let Some(parent_id) = input.parent_id.as_deref() {
        if OutlineRepo::find_in_project(&state.pool, &project_id, parent_id)
            .await?
            .is_none()
        {
            return Err(foreign_parent(parent_id));
        }
    }

    let item = OutlineRepo::create(&state.pool, &project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/projects/{id}/outline/items/{item_id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateOutlineItem>,
) -> AppResult<Json<DataResponse<Outline>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    input.validate()?;
    ensure_item_exists(&state.pool, &project_id, &item_id).await?;

    if let Some(Some(parent_id)) = input.parent_id.as_ref().map(|p| p.as_deref()) {
        validate_not_self_parent(&item_id, Some(parent_id))?;
        let nodes = load_nodes(&state.pool, &project_id).await?;
        ensure_parent_in_project(&nodes, parent_id)?;
        if would_create_cycle(&nodes, &item_id, Some(parent_id)) {
            return Err(CoreError::Validation(format!(
                "Moving outline item {item_id} under {parent_id} would create a cycle"
            ))
            .into());
        }
    }

    let item = OutlineRepo::update(&state.pool, &item_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("OutlineItem", item_id)))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/projects/{id}/outline/items/{item_id}
///
/// Descendants and their generated content are removed with the item.
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_item_exists(&state.pool, &project_id, &item_id).await?;
    OutlineRepo::delete(&state.pool, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/{id}/outline/reorder
///
/// The whole batch is validated against the current outline first; the
/// accepted entries are then written one at a time.
pub async fn reorder(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<ReorderResponse>>> {
    ensure_project_exists(&state.pool, &project_id).await?;
    let mut nodes = load_nodes(&state.pool, &project_id).await?;
    apply_reorder(&mut nodes, &input.updates)?;

    for entry in &input.updates {
        OutlineRepo::update_position(
            &state.pool,
            &entry.item_id,
            entry.parent_id.as_deref(),
            entry.sort_order,
        )
        .await?;
    }

    tracing::debug!(project_id = %project_id, updated = input.updates.len(), "Outline reordered");
    Ok(Json(DataResponse {
        data: ReorderResponse {
            updated: input.updates.len(),
        },
    }))
}
