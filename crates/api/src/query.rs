//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for task-log listings. Clamped by
/// [`clamp_log_limit`](texbook_core::project::clamp_log_limit).
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
