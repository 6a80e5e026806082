//! Handlers for the annotation form and the annotation list.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use labar_core::types::SessionId;

use crate::error::AppResult;
use crate::handlers::session::SessionView;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `PATCH /sessions/{id}/form`.
///
/// Every field is optional; only present fields are written. Raw text goes
/// in as typed; validation happens at submission, not per keystroke.
#[derive(Debug, Default, Deserialize)]
pub struct FormUpdate {
    pub natural_language_description: Option<String>,
    pub action_type: Option<String>,
    pub action_description: Option<String>,
    pub detected_apparatus: Option<String>,
    pub detected_instruments: Option<String>,
    pub detected_materials: Option<String>,
    pub spatial_information: Option<String>,
    pub dataset_repo: Option<String>,
    pub dataset_private: Option<bool>,
}

/// POST /sessions/{id}/form/toggle-mode
///
/// Flip between structured and natural-language entry.
pub async fn toggle_form_mode(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            s.toggle_form_mode();
            SessionView::from_session(id, s)
        })
        .await?;

    Ok(Json(DataResponse { data: view }))
}

/// PATCH /sessions/{id}/form
///
/// Write the provided form fields into the session.
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(input): Json<FormUpdate>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            if let Some(v) = input.natural_language_description {
                s.set_natural_language_description(v);
            }
            if let Some(v) = input.action_type {
                s.set_action_type(v);
            }
            if let Some(v) = input.action_description {
                s.set_action_description(v);
            }
            if let Some(v) = input.detected_apparatus {
                s.set_detected_apparatus(v);
            }
            if let Some(v) = input.detected_instruments {
                s.set_detected_instruments(v);
            }
            if let Some(v) = input.detected_materials {
                s.set_detected_materials(v);
            }
            if let Some(v) = input.spatial_information {
                s.set_spatial_information(v);
            }
            if let Some(v) = input.dataset_repo {
                s.set_dataset_repo(v);
            }
            if let Some(v) = input.dataset_private {
                s.set_dataset_private(v);
            }
            SessionView::from_session(id, s)
        })
        .await?;

    Ok(Json(DataResponse { data: view }))
}

/// POST /sessions/{id}/form/clear
///
/// Reset all form fields without submitting.
pub async fn clear_form(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            s.clear_form();
            SessionView::from_session(id, s)
        })
        .await?;

    Ok(Json(DataResponse { data: view }))
}

/// POST /sessions/{id}/annotations
///
/// Submit the active form shape as a new annotation. A form that fails
/// validation reports through `form_error` and appends nothing.
pub async fn add_annotation(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            s.add_annotation();
            SessionView::from_session(id, s)
        })
        .await?;

    if view.form_error.is_empty() {
        tracing::info!(
            session_id = %id,
            total = view.annotations.len(),
            frame = view.current_frame,
            "Annotation added"
        );
    }

    Ok(Json(DataResponse { data: view }))
}

/// DELETE /sessions/{id}/annotations/last
///
/// Drop the most recent annotation; a no-op on an empty list.
pub async fn remove_last_annotation(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .sessions
        .with_session(id, |s| {
            s.remove_last_annotation();
            SessionView::from_session(id, s)
        })
        .await?;

    Ok(Json(DataResponse { data: view }))
}
