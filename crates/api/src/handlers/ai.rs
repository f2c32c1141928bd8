//! LLM-backed helpers outside the generation loop.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use texbook_core::outline_draft::{parse_outline_response, OutlineDraft};
use texbook_core::prompt::{build_outline_prompt, OUTLINE_MAX_TOKENS};
use texbook_core::types::DbId;
use texbook_llm::PingResult;

use super::project::ensure_project_exists;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateOutlineRequest {
    #[serde(default)]
    pub prompt: String,
}

/// A drafted outline. Nothing is persisted.
#[derive(Debug, Serialize)]
pub struct OutlineDraftResponse {
    pub outline: Vec<OutlineDraft>,
    pub provider: &'static str,
    pub model: String,
}

/// POST /api/v1/projects/{id}/generate-outline
pub async fn generate_outline(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<GenerateOutlineRequest>,
) -> AppResult<Json<DataResponse<OutlineDraftResponse>>> {
    let request = input.prompt.trim();
    if request.is_empty() {
        return Err(AppError::BadRequest("Prompt is required".to_string()));
    }
    ensure_project_exists(&state.pool, &id).await?;

    let completion = state
        .llm
        .complete(&build_outline_prompt(request), OUTLINE_MAX_TOKENS)
        .await?;
    let outline = parse_outline_response(&completion.text)?;

    tracing::info!(
        project_id = %id,
        provider = completion.provider,
        entries = outline.iter().map(OutlineDraft::entry_count).sum::<usize>(),
        "Outline drafted"
    );

    Ok(Json(DataResponse {
        data: OutlineDraftResponse {
            outline,
            provider: completion.provider,
            model: completion.model,
        },
    }))
}

/// POST /api/v1/ai/test
///
/// Probes every configured provider; an empty list means none are configured.
pub async fn test_connection(State(state): State<AppState>) -> Json<DataResponse<Vec<PingResult>>> {
    Json(DataResponse {
        data: state.llm.ping().await,
    })
}
