//! HTTP-level integration tests for dataset export.
//!
//! The exporter is a recording mock; these tests pin down which failures
//! reach it and how outcomes land in the session's export strings.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app_with_exporter, create_session, patch_json, post_json, put_json,
    MockExporter,
};
use serde_json::json;

/// Create a session holding one annotation.
async fn session_with_annotation(app: &axum::Router) -> String {
    let id = create_session(app).await;
    put_json(
        app.clone(),
        &format!("/api/v1/sessions/{id}/video-url"),
        json!({"url": "https://example.com/run.mp4"}),
    )
    .await;
    patch_json(
        app.clone(),
        &format!("/api/v1/sessions/{id}/form"),
        json!({"action_type": "observe", "action_description": "watches"}),
    )
    .await;
    post_json(
        app.clone(),
        &format!("/api/v1/sessions/{id}/annotations"),
        json!({}),
    )
    .await;
    id
}

// ---------------------------------------------------------------------------
// Test: successful push records outcome and clears errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_export_reports_success() {
    let exporter = Arc::new(MockExporter::new());
    let app = build_test_app_with_exporter(Arc::clone(&exporter));
    let id = session_with_annotation(&app).await;

    let response = post_json(
        app,
        &format!("/api/v1/sessions/{id}/export"),
        json!({"repo": "alice/lab-videos", "private": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["export_success"],
        "Successfully pushed 1 annotations to alice/lab-videos"
    );
    assert_eq!(json["data"]["export_error"], "");
    assert_eq!(json["data"]["export_status"], "");
    assert_eq!(json["data"]["dataset_repo"], "alice/lab-videos");
    assert_eq!(json["data"]["dataset_private"], true);

    let pushes = exporter.pushes.lock().unwrap();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].repo, "alice/lab-videos");
    assert!(pushes[0].private);
    assert_eq!(pushes[0].records, 1);
}

// ---------------------------------------------------------------------------
// Test: empty annotation list fails without reaching the host
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_with_no_annotations_reports_error() {
    let exporter = Arc::new(MockExporter::new());
    let app = build_test_app_with_exporter(Arc::clone(&exporter));
    let id = create_session(&app).await;

    let response = post_json(
        app,
        &format!("/api/v1/sessions/{id}/export"),
        json!({"repo": "alice/lab-videos"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["export_error"], "No annotations to push");
    assert_eq!(json["data"]["export_success"], "");
    assert_eq!(exporter.push_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: malformed repo id fails without a push
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_with_bad_repo_reports_error() {
    let exporter = Arc::new(MockExporter::new());
    let app = build_test_app_with_exporter(Arc::clone(&exporter));
    let id = session_with_annotation(&app).await;

    let response = post_json(
        app,
        &format!("/api/v1/sessions/{id}/export"),
        json!({"repo": "no-slash"}),
    )
    .await;

    let json = body_json(response).await;
    assert!(json["data"]["export_error"]
        .as_str()
        .unwrap()
        .contains("username/dataset-name"));
    assert_eq!(exporter.push_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: host failure lands in export_error only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn host_failure_is_absorbed_into_export_error() {
    let exporter = Arc::new(MockExporter::failing());
    let app = build_test_app_with_exporter(Arc::clone(&exporter));
    let id = session_with_annotation(&app).await;

    let response = post_json(
        app,
        &format!("/api/v1/sessions/{id}/export"),
        json!({"repo": "alice/lab-videos"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["export_error"]
        .as_str()
        .unwrap()
        .contains("mock failure"));
    assert_eq!(json["data"]["export_success"], "");
    assert_eq!(exporter.push_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: repo settings persist in the session between exports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repo_settings_persist_between_exports() {
    let exporter = Arc::new(MockExporter::new());
    let app = build_test_app_with_exporter(Arc::clone(&exporter));
    let id = session_with_annotation(&app).await;
    let export_uri = format!("/api/v1/sessions/{id}/export");

    post_json(
        app.clone(),
        &export_uri,
        json!({"repo": "alice/lab-videos", "private": true}),
    )
    .await;

    // Second export without overrides reuses the stored settings.
    let response = post_json(app, &export_uri, json!({})).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["dataset_repo"], "alice/lab-videos");
    assert_eq!(json["data"]["dataset_private"], true);

    let pushes = exporter.pushes.lock().unwrap();
    assert_eq!(pushes.len(), 2);
    assert_eq!(pushes[1].repo, "alice/lab-videos");
    assert!(pushes[1].private);
}
