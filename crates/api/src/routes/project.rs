//! Route definitions for the `/projects` resource.
//!
//! Also nests the outline routes under `/projects/{project_id}/outline`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{ai, export, generation, outline, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                       -> list
/// POST   /                                       -> create
/// GET    /{id}                                   -> get_by_id
/// PUT    /{id}                                   -> update
/// DELETE /{id}                                   -> delete
/// GET    /{id}/latex-header                      -> get_latex_header
/// PUT    /{id}/latex-header                      -> update_latex_header
/// GET    /{id}/logs                              -> list_logs
///
/// GET    /{project_id}/outline                   -> list
/// GET    /{project_id}/outline/tree              -> tree
/// POST   /{project_id}/outline/items             -> create
/// PUT    /{project_id}/outline/items/{item_id}   -> update
/// DELETE /{project_id}/outline/items/{item_id}   -> delete
/// PUT    /{project_id}/outline/reorder           -> reorder
///
/// POST   /{id}/generate-outline                  -> ai::generate_outline
/// POST   /{id}/generate                          -> generation::generate
/// GET    /{id}/export/latex                      -> export::export_latex
/// GET    /{id}/export/pdf                        -> export::export_pdf
/// ```
pub fn router() -> Router<AppState> {
    let outline_routes = Router::new()
        .route("/", get(outline::list))
        .route("/tree", get(outline::tree))
        .route("/items", post(outline::create))
        .route(
            "/items/{item_id}",
            put(outline::update).delete(outline::delete),
        )
        .route("/reorder", put(outline::reorder));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/latex-header",
            get(project::get_latex_header).put(project::update_latex_header),
        )
        .route("/{id}/logs", get(project::list_logs))
        .route("/{id}/generate-outline", post(ai::generate_outline))
        .route("/{id}/generate", post(generation::generate))
        .route("/{id}/export/latex", get(export::export_latex))
        .route("/{id}/export/pdf", get(export::export_pdf))
        .nest("/{id}/outline", outline_routes)
}
