#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use texbook_api::config::ServerConfig;
use texbook_api::router::build_app_router;
use texbook_api::state::AppState;
use texbook_core::error::CoreError;
use texbook_core::exercises::extract_exercises;
use texbook_core::generation::{ContentGenerator, GeneratedDraft, GenerationContext};
use texbook_core::outline::OutlineNode;
use texbook_llm::ProviderChain;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
    }
}

/// Generator that writes a fixed body per item and can be told to fail on
/// the n-th call (1-based).
pub struct ScriptedGenerator {
    fail_on_call: Option<usize>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    pub fn succeeding() -> Self {
        Self {
            fail_on_call: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, readable after the generator is moved into the app.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        node: &OutlineNode,
        _context: &GenerationContext,
    ) -> Result<GeneratedDraft, CoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(CoreError::Generation(format!(
                "provider unavailable while writing {}",
                node.title
            )));
        }
        let content = format!(
            "Body of {}. \\ex{{What is 1+1?}} \\sol{{2}}",
            node.title
        );
        Ok(GeneratedDraft {
            exercises: extract_exercises(&content),
            content,
        })
    }
}

/// Build the full application router backed by `pool`, with a generator
/// that always succeeds and an empty provider chain.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_generator(pool, Arc::new(ScriptedGenerator::succeeding()))
}

/// Same as [`build_test_app`] with a caller-supplied generator.
pub fn build_test_app_with_generator(
    pool: SqlitePool,
    generator: Arc<dyn ContentGenerator>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
        llm: Arc::new(ProviderChain::new(Vec::new(), 1024)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project and return its id.
pub async fn create_project(pool: &SqlitePool, title: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({ "title": title }),
    )
    .await;
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create an outline item and return its id.
pub async fn create_item(
    pool: &SqlitePool,
    project_id: &str,
    parent_id: Option<&str>,
    title: &str,
    level: &str,
    sort_order: i64,
) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/outline/items"),
        serde_json::json!({
            "parent_id": parent_id,
            "title": title,
            "level": level,
            "sort_order": sort_order,
        }),
    )
    .await;
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
