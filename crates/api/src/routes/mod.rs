pub mod ai;
pub mod content;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                   list, create
/// /projects/{id}                              get, update, delete
/// /projects/{id}/latex-header                 get, replace
/// /projects/{id}/logs                         task log (newest first)
///
/// /projects/{id}/outline                      flat list
/// /projects/{id}/outline/tree                 nested tree
/// /projects/{id}/outline/items                create
/// /projects/{id}/outline/items/{item_id}      update, delete
/// /projects/{id}/outline/reorder              batch reorder (PUT)
///
/// /projects/{id}/generate-outline             LLM outline draft (POST)
/// /projects/{id}/generate                     run content generation (POST)
/// /projects/{id}/export/latex                 document download
/// /projects/{id}/export/pdf                   not implemented (501)
///
/// /content/{outline_id}                       generated content for one item
///
/// /ai/test                                    probe LLM providers (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/content", content::router())
        .nest("/ai", ai::router())
}
