//! Handlers that run content generation and read its results.

use axum::extract::{Path, State};
use axum::Json;
use texbook_core::error::CoreError;
use texbook_core::types::DbId;
use texbook_db::models::chapter_content::ChapterContent;
use texbook_db::repositories::ChapterContentRepo;

use crate::engine::generation::{run_generation, GenerationSummary};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/generate
///
/// Runs the whole loop inside the request. A failed item stops the run and
/// the response is a 502 carrying the generator's message.
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GenerationSummary>>> {
    let summary = run_generation(&state.pool, state.generator.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/content/{outline_id}
pub async fn get_content(
    State(state): State<AppState>,
    Path(outline_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChapterContent>>> {
    let content = ChapterContentRepo::find_by_outline(&state.pool, &outline_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ChapterContent", outline_id)))?;
    Ok(Json(DataResponse { data: content }))
}
