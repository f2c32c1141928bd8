use std::sync::Arc;

use texbook_core::generation::ContentGenerator;
use texbook_llm::ProviderChain;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: texbook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Produces content for each outline item during a generation run.
    pub generator: Arc<dyn ContentGenerator>,
    /// Provider chain for outline drafting and connectivity checks.
    pub llm: Arc<ProviderChain>,
}
