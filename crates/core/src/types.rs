/// Identifier for a live annotation session.
pub type SessionId = uuid::Uuid;

/// UTC timestamp used across the workspace.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
