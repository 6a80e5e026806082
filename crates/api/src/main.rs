use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labar_api::config::ServerConfig;
use labar_api::router::build_app_router;
use labar_api::sessions::{reaper, SessionManager};
use labar_api::state::AppState;
use labar_export::hub::HubExporter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labar_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        frontend_url = %config.frontend_url,
        "Loaded server configuration"
    );
    if config.hub.token.is_none() {
        tracing::warn!("HUB_TOKEN not set; dataset export will be unavailable");
    }

    // --- Sessions ---
    let sessions = Arc::new(SessionManager::new());

    // --- Session reaper ---
    let reaper_cancel = tokio_util::sync::CancellationToken::new();
    let reaper_handle = reaper::start_reaper(
        Arc::clone(&sessions),
        Duration::from_secs(config.session_idle_secs),
        reaper_cancel.clone(),
    );
    tracing::info!(
        idle_secs = config.session_idle_secs,
        "Session reaper started"
    );

    // --- Dataset exporter ---
    let exporter = Arc::new(HubExporter::new(
        config.hub.endpoint.clone(),
        config.hub.token.clone(),
    ));

    // --- App state ---
    let state = AppState {
        sessions: Arc::clone(&sessions),
        exporter,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    reaper_cancel.cancel();
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        reaper_handle,
    )
    .await;
    tracing::info!("Session reaper stopped");

    let remaining = sessions.count().await;
    tracing::info!(remaining, "Discarding remaining sessions");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
