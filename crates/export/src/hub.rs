//! HTTP client for the dataset-hosting service.
//!
//! [`HubExporter`] holds the endpoint and credentials for one dataset host.
//! A push is two requests: ensure the dataset repo exists, then upload the
//! JSONL file. An existing repo is not an error.

use async_trait::async_trait;
use serde::Deserialize;

use labar_core::annotation::AnnotationRecord;

use crate::jsonl::{to_jsonl, DATASET_FILE_NAME};
use crate::{validate_repo_id, DatasetExporter, ExportError, ExportOutcome};

/// Exporter backed by a dataset host's HTTP API.
pub struct HubExporter {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

/// Error body shape returned by the dataset host.
#[derive(Debug, Deserialize)]
struct HubErrorBody {
    error: Option<String>,
}

impl HubExporter {
    /// Create an exporter targeting `endpoint` (e.g. `https://huggingface.co`).
    ///
    /// Without a token every push fails with [`ExportError::MissingToken`];
    /// the server still runs for annotation work.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create the dataset repo if it does not exist yet.
    async fn ensure_repo(&self, token: &str, repo: &str, private: bool) -> Result<(), ExportError> {
        let response = self
            .http
            .post(format!("{}/api/repos/create", self.endpoint))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "type": "dataset",
                "name": repo,
                "private": private,
            }))
            .send()
            .await?;

        let status = response.status();
        // 409 means the repo already exists, which is fine for re-pushes.
        if status.is_success() || status == reqwest::StatusCode::CONFLICT {
            return Ok(());
        }

        Err(Self::rejection(status, response).await)
    }

    /// Upload the serialized annotation set to the repo's main branch.
    async fn upload(&self, token: &str, repo: &str, body: Vec<u8>) -> Result<(), ExportError> {
        let response = self
            .http
            .post(format!(
                "{}/api/datasets/{}/upload/main/{}",
                self.endpoint, repo, DATASET_FILE_NAME
            ))
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(Self::rejection(status, response).await)
    }

    /// Turn a non-success response into a [`ExportError::Rejected`].
    async fn rejection(status: reqwest::StatusCode, response: reqwest::Response) -> ExportError {
        let message = match response.json::<HubErrorBody>().await {
            Ok(body) => body.error.unwrap_or_else(|| "unknown error".to_string()),
            Err(_) => "unknown error".to_string(),
        };
        ExportError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl DatasetExporter for HubExporter {
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
        let token = self.token.as_deref().ok_or(ExportError::MissingToken)?;

        let body = to_jsonl(records)?;

        self.ensure_repo(token, repo, private).await?;
        self.upload(token, repo, body).await?;

        tracing::info!(
            repo,
            records = records.len(),
            private,
            "Pushed annotation dataset"
        );

        Ok(ExportOutcome {
            repo: repo.to_string(),
            records_pushed: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labar_core::annotation::AnnotationContent;

    fn one_record() -> Vec<AnnotationRecord> {
        vec![AnnotationRecord {
            frame: 0,
            time_seconds: 0.0,
            video_url: "https://example.com/run.mp4".to_string(),
            content: AnnotationContent::NaturalLanguage {
                description: "note".to_string(),
            },
        }]
    }

    #[tokio::test]
    async fn push_without_token_fails_before_any_request() {
        let exporter = HubExporter::new("https://hub.invalid", None);
        let err = exporter
            .push("alice/lab-videos", false, &one_record())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::MissingToken));
    }

    #[tokio::test]
    async fn push_rejects_bad_repo_before_any_request() {
        let exporter = HubExporter::new("https://hub.invalid", Some("tok".to_string()));
        let err = exporter
            .push("no-slash", false, &one_record())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidRepoId(_)));
    }

    #[tokio::test]
    async fn push_rejects_empty_dataset_before_any_request() {
        let exporter = HubExporter::new("https://hub.invalid", Some("tok".to_string()));
        let err = exporter.push("alice/ds", false, &[]).await.unwrap_err();
        assert!(matches!(err, ExportError::EmptyDataset));
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let exporter = HubExporter::new("https://hub.example/", None);
        assert_eq!(exporter.endpoint, "https://hub.example");
    }
}
