//! Shared helpers for the HTTP integration tests.
//!
//! Requests are driven straight into the router via `tower::ServiceExt`,
//! using the same middleware stack production uses. The dataset exporter is
//! replaced by a recording mock.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use labar_api::config::{HubConfig, ServerConfig};
use labar_api::router::build_app_router;
use labar_api::sessions::SessionManager;
use labar_api::state::AppState;
use labar_core::annotation::AnnotationRecord;
use labar_export::{validate_repo_id, DatasetExporter, ExportError, ExportOutcome};

/// One push recorded by [`MockExporter`].
#[derive(Debug, Clone)]
pub struct RecordedPush {
    pub repo: String,
    pub private: bool,
    pub records: usize,
}

/// Exporter double: validates like the real one, records successful pushes,
/// and can be flipped into a failing mode.
pub struct MockExporter {
    pub pushes: Mutex<Vec<RecordedPush>>,
    pub fail: bool,
}

impl MockExporter {
    pub fn new() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }
}

#[async_trait]
impl DatasetExporter for MockExporter {
    async fn push(
        &self,
        repo: &str,
        private: bool,
        records: &[AnnotationRecord],
    ) -> Result<ExportOutcome, ExportError> {
        validate_repo_id(repo)?;
        if records.is_empty() {
            return Err(ExportError::EmptyDataset);
        }
        if self.fail {
            return Err(ExportError::Rejected {
                status: 500,
                message: "mock failure".to_string(),
            });
        }

        self.pushes.lock().unwrap().push(RecordedPush {
            repo: repo.to_string(),
            private,
            records: records.len(),
        });

        Ok(ExportOutcome {
            repo: repo.to_string(),
            records_pushed: records.len(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        session_idle_secs: 3600,
        frontend_url: "http://localhost:3000".to_string(),
        hub: HubConfig {
            endpoint: "https://hub.invalid".to_string(),
            token: None,
        },
    }
}

/// Build the full application router with the given exporter.
pub fn build_test_app_with_exporter(exporter: Arc<MockExporter>) -> Router {
    let config = test_config();
    let state = AppState {
        sessions: Arc::new(SessionManager::new()),
        exporter,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the full application router with a fresh recording exporter.
pub fn build_test_app() -> Router {
    build_test_app_with_exporter(Arc::new(MockExporter::new()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PATCH, uri, body).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a session and return its id.
pub async fn create_session(app: &Router) -> String {
    let response = post_json(app.clone(), "/api/v1/sessions", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().expect("session id").to_string()
}
