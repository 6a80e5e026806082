//! Idle-session eviction task.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::SessionManager;

/// How often the reaper checks for idle sessions.
const REAP_INTERVAL_SECS: u64 = 60;

/// Spawn a background task that periodically discards sessions idle for
/// longer than `max_idle`.
///
/// The task runs until `cancel` is triggered during shutdown. The returned
/// `JoinHandle` lets the caller await the final tick.
pub fn start_reaper(
    sessions: Arc<SessionManager>,
    max_idle: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(REAP_INTERVAL_SECS));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let evicted = sessions.evict_idle(max_idle).await;
                    if evicted > 0 {
                        tracing::info!(evicted, "Discarded idle annotation sessions");
                    }
                }
                () = cancel.cancelled() => {
                    tracing::debug!("Session reaper stopping");
                    break;
                }
            }
        }
    })
}
