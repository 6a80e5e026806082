//! Handlers for session lifecycle and video state.
//!
//! Mutators follow the absorb-and-report contract: the session swallows
//! validation failures into its error strings, so these handlers return the
//! updated snapshot with HTTP 200 either way. Only an unknown session id is
//! an HTTP error.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use labar_core::annotation::AnnotationRecord;
use labar_core::form::AnnotationForm;
use labar_core::session::AnnotationSession;
use labar_core::types::SessionId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Full session snapshot rendered by the UI after every operation.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: SessionId,
    pub video_url: String,
    pub video_error: String,
    pub current_time: f64,
    pub fps: u32,
    /// Derived, never stored: `floor(current_time * fps)`.
    pub current_frame: i64,
    pub is_natural_language_mode: bool,
    pub form: AnnotationForm,
    pub form_error: String,
    pub annotations: Vec<AnnotationRecord>,
    pub dataset_repo: String,
    pub dataset_private: bool,
    pub export_status: String,
    pub export_error: String,
    pub export_success: String,
}

impl SessionView {
    pub fn from_session(id: SessionId, session: &AnnotationSession) -> Self {
        Self {
            id,
            video_url: session.video_url().to_string(),
            video_error: session.video_error().to_string(),
            current_time: session.current_time(),
            fps: session.fps(),
            current_frame: session.current_frame(),
            is_natural_language_mode: session.is_natural_language_mode(),
            form: session.form().clone(),
            form_error: session.form_error().to_string(),
            annotations: session.annotations().to_vec(),
            dataset_repo: session.dataset_repo().to_string(),
            dataset_private: session.dataset_private(),
            export_status: session.export_status().to_string(),
            export_error: session.export_error().to_string(),
            export_success: session.export_success().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `PUT /sessions/{id}/video-url`.
#[derive(Debug, Deserialize)]
pub struct SetVideoUrl {
    pub url: String,
}

/// Body for `PUT /sessions/{id}/fps`. The value arrives as the raw text the
/// user typed; parsing happens in the session.
#[derive(Debug, Deserialize)]
pub struct SetFps {
    pub fps: String,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /sessions
///
/// Create a fresh annotation session.
pub async fn create_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let id = state.sessions.create().await;
    let view = state
        .sessions
        .with_session(id, |s| SessionView::from_session(id, s))
        .await?;

    tracing::info!(session_id = %id, "Annotation session created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /sessions/{id}
///
/// Current snapshot, including the derived frame index.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| SessionView::from_session(id, s))
        .await?;

    Ok(Json(DataResponse { data: view }))
}

/// DELETE /sessions/{id}
///
/// Discard a session.
pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let created_at = state.sessions.created_at(id).await;

    if !state.sessions.remove(id).await {
        return Err(labar_core::error::CoreError::NotFound {
            entity: "Session",
            id,
        }
        .into());
    }

    let age_secs = created_at
        .map(|t| (chrono::Utc::now() - t).num_seconds())
        .unwrap_or_default();
    tracing::info!(session_id = %id, age_secs, "Annotation session closed");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Video state
// ---------------------------------------------------------------------------

/// PUT /sessions/{id}/video-url
///
/// Validate and set the video URL; failures land in `video_error`.
pub async fn set_video_url(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(input): Json<SetVideoUrl>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            s.set_video_url(&input.url);
            SessionView::from_session(id, s)
        })
        .await?;

    if view.video_error.is_empty() {
        tracing::debug!(session_id = %id, url = %view.video_url, "Video URL set");
    } else {
        tracing::debug!(session_id = %id, error = %view.video_error, "Video URL rejected");
    }

    Ok(Json(DataResponse { data: view }))
}

/// POST /sessions/{id}/progress
///
/// Accepts the raw player progress payload (`{ "playedSeconds": ... }`).
/// Malformed payloads are absorbed into `video_error`.
pub async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(progress): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            s.update_progress(&progress);
            SessionView::from_session(id, s)
        })
        .await?;

    Ok(Json(DataResponse { data: view }))
}

/// PUT /sessions/{id}/fps
///
/// Parse and set the frame rate; failures land in `video_error`.
pub async fn set_fps(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(input): Json<SetFps>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            s.set_fps(&input.fps);
            SessionView::from_session(id, s)
        })
        .await?;

    Ok(Json(DataResponse { data: view }))
}
