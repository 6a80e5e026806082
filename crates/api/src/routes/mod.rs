pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions                                 create (POST)
/// /sessions/{id}                            snapshot (GET), discard (DELETE)
/// /sessions/{id}/video-url                  set video URL (PUT)
/// /sessions/{id}/progress                   playback progress report (POST)
/// /sessions/{id}/fps                        set frame rate (PUT)
/// /sessions/{id}/form                       update form fields (PATCH)
/// /sessions/{id}/form/toggle-mode           flip entry mode (POST)
/// /sessions/{id}/form/clear                 reset form (POST)
/// /sessions/{id}/annotations                submit form (POST)
/// /sessions/{id}/annotations/last           drop newest (DELETE)
/// /sessions/{id}/export                     push dataset (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(session::router())
}
