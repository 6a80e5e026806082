use std::sync::Arc;

use crate::config::ServerConfig;
use crate::sessions::SessionManager;
use labar_export::DatasetExporter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Live annotation sessions, one per connected user.
    pub sessions: Arc<SessionManager>,
    /// Dataset export boundary; tests inject a recording mock here.
    pub exporter: Arc<dyn DatasetExporter>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
