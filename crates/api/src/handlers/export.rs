//! Document export.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use texbook_core::latex::{assemble_document, export_filename, DocumentMeta, LATEX_CONTENT_TYPE};
use texbook_core::outline::OutlineNode;
use texbook_core::types::DbId;
use texbook_db::repositories::{ChapterContentRepo, OutlineRepo};

use super::project::ensure_project_exists;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/export/latex
///
/// Items without generated content are exported as headings only.
pub async fn export_latex(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_project_exists(&state.pool, &id).await?;

    let nodes: Vec<OutlineNode> = OutlineRepo::list_by_project(&state.pool, &id)
        .await?
        .into_iter()
        .map(OutlineNode::from)
        .collect();

    let contents: HashMap<String, String> = ChapterContentRepo::list_by_project(&state.pool, &id)
        .await?
        .into_iter()
        .filter_map(|c| c.content.map(|text| (c.outline_id, text)))
        .collect();

    let document = assemble_document(
        DocumentMeta {
            title: &project.title,
            latex_header: project.latex_header.as_deref(),
        },
        &nodes,
        &contents,
    );

    tracing::info!(
        project_id = %id,
        items = nodes.len(),
        with_content = contents.len(),
        bytes = document.len(),
        "LaTeX document exported"
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(&project.title)
    );

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, LATEX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        document,
    ))
}

/// GET /api/v1/projects/{id}/export/pdf
///
/// PDF compilation is not done server-side; the response explains how to
/// compile the LaTeX export locally.
pub async fn export_pdf(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, &id).await?;

    Ok((
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({
            "error": "PDF export is not available on the server. Export LaTeX and compile it locally.",
            "code": "NOT_IMPLEMENTED",
            "suggestions": [
                "Compile with pdflatex, xelatex or lualatex",
                "Upload the .tex file to Overleaf",
                "Use the LaTeX Workshop extension in VS Code"
            ],
            "recommended_engines": ["xelatex", "lualatex"]
        })),
    ))
}
