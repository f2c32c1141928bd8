//! Route definitions for `/ai`.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST   /test                                   -> test_connection
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/test", post(ai::test_connection))
}
