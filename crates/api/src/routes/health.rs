use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether every required table exists.
    pub schema_ready: bool,
    /// Required tables that are absent.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_tables: Vec<&'static str>,
}

/// GET /health -- returns service, database and schema health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = texbook_db::health_check(&state.pool).await.is_ok();

    let missing_tables = if db_healthy {
        match texbook_db::missing_tables(&state.pool).await {
            Ok(missing) => missing,
            Err(e) => {
                tracing::warn!(error = %e, "Schema check failed");
                texbook_db::REQUIRED_TABLES.to_vec()
            }
        }
    } else {
        texbook_db::REQUIRED_TABLES.to_vec()
    };
    let schema_ready = missing_tables.is_empty();

    let status = if db_healthy && schema_ready { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_ready,
        missing_tables,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
