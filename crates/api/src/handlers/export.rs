//! Handler for pushing the annotation set to the dataset host.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use labar_core::types::SessionId;

use crate::error::AppResult;
use crate::handlers::session::SessionView;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /sessions/{id}/export`. Overrides the session's stored
/// repo/privacy when present.
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    pub repo: Option<String>,
    pub private: Option<bool>,
}

/// POST /sessions/{id}/export
///
/// Push the session's annotations to the configured dataset host. The push
/// outcome (success or failure) lands in the session's export strings and
/// the updated snapshot is returned with HTTP 200; a failed push is not an
/// HTTP failure here.
pub async fn export_dataset(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(input): Json<ExportRequest>,
) -> AppResult<impl IntoResponse> {
    // Snapshot what the push needs while holding the lock, then release it
    // for the duration of the network call.
    let (repo, private, records) = state
        .sessions
        .with_session(id, |s| {
            if let Some(repo) = input.repo {
                s.set_dataset_repo(repo);
            }
            if let Some(private) = input.private {
                s.set_dataset_private(private);
            }
            s.begin_export();
            (
                s.dataset_repo().to_string(),
                s.dataset_private(),
                s.annotations().to_vec(),
            )
        })
        .await?;

    let result = state.exporter.push(&repo, private, &records).await;

    let view = state
        .sessions
        .with_session(id, |s| {
            match &result {
                Ok(outcome) => {
                    s.finish_export(format!(
                        "Successfully pushed {} annotations to {}",
                        outcome.records_pushed, outcome.repo
                    ));
                }
                Err(err) => s.fail_export(err.to_string()),
            }
            SessionView::from_session(id, s)
        })
        .await?;

    match result {
        Ok(outcome) => tracing::info!(
            session_id = %id,
            repo = %outcome.repo,
            records = outcome.records_pushed,
            "Dataset export succeeded"
        ),
        Err(err) => tracing::warn!(
            session_id = %id,
            repo = %repo,
            error = %err,
            "Dataset export failed"
        ),
    }

    Ok(Json(DataResponse { data: view }))
}
