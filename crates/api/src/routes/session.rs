//! Route definitions for annotation sessions.

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::handlers::{annotation, export, session};
use crate::state::AppState;

/// Session routes, nested under `/api/v1`.
///
/// ```text
/// POST   /sessions                         create_session
/// GET    /sessions/{id}                    get_session
/// DELETE /sessions/{id}                    close_session
/// PUT    /sessions/{id}/video-url          set_video_url
/// POST   /sessions/{id}/progress           update_progress
/// PUT    /sessions/{id}/fps                set_fps
/// PATCH  /sessions/{id}/form               update_form
/// POST   /sessions/{id}/form/toggle-mode   toggle_form_mode
/// POST   /sessions/{id}/form/clear         clear_form
/// POST   /sessions/{id}/annotations        add_annotation
/// DELETE /sessions/{id}/annotations/last   remove_last_annotation
/// POST   /sessions/{id}/export             export_dataset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(session::create_session))
        .route(
            "/sessions/{id}",
            get(session::get_session).delete(session::close_session),
        )
        .route("/sessions/{id}/video-url", put(session::set_video_url))
        .route("/sessions/{id}/progress", post(session::update_progress))
        .route("/sessions/{id}/fps", put(session::set_fps))
        .route("/sessions/{id}/form", patch(annotation::update_form))
        .route(
            "/sessions/{id}/form/toggle-mode",
            post(annotation::toggle_form_mode),
        )
        .route("/sessions/{id}/form/clear", post(annotation::clear_form))
        .route(
            "/sessions/{id}/annotations",
            post(annotation::add_annotation),
        )
        .route(
            "/sessions/{id}/annotations/last",
            delete(annotation::remove_last_annotation),
        )
        .route("/sessions/{id}/export", post(export::export_dataset))
}
