//! Dataset export boundary.
//!
//! Turns a session's accumulated annotations into a JSONL dataset and pushes
//! it to a dataset-hosting service. The API layer only sees the
//! [`DatasetExporter`] trait so tests can substitute a recording mock.

pub mod hub;
pub mod jsonl;

use async_trait::async_trait;

use labar_core::annotation::AnnotationRecord;

/// Errors raised while pushing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Dataset repo must be in 'username/dataset-name' format")]
    InvalidRepoId(String),

    #[error("No annotations to push")]
    EmptyDataset,

    #[error("No dataset host token configured")]
    MissingToken,

    #[error("Failed to serialize annotations: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Dataset host request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Dataset host rejected the push ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Result of a successful push.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Fully qualified repo id the records landed in.
    pub repo: String,
    /// Number of records written.
    pub records_pushed: usize,
}

/// Pushes an annotation set to a dataset host.
#[async_trait]
pub trait DatasetExporter: Send + Sync {
    async fn push(
        &self,
        repo: &str,
        private: bool,
        records: &[AnnotationRecord],
    ) -> Result<ExportOutcome, ExportError>;
}

/// Validate a `username/dataset-name` repo id.
///
/// Both segments must be non-empty and limited to alphanumerics, `-`, `_`
/// and `.`, matching what dataset hosts accept in repo slugs.
pub fn validate_repo_id(repo: &str) -> Result<(), ExportError> {
    let invalid = || ExportError::InvalidRepoId(repo.to_string());

    let (namespace, name) = repo.split_once('/').ok_or_else(invalid)?;
    if namespace.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }

    let segment_ok = |s: &str| {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if !segment_ok(namespace) || !segment_ok(name) {
        return Err(invalid());
    }

    Ok(())
}
