//! Route definitions for `/content`.

use axum::routing::get;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET    /{outline_id}                           -> get_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{outline_id}", get(generation::get_content))
}
