use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use labar_core::error::CoreError;
use labar_core::session::AnnotationSession;
use labar_core::types::{SessionId, Timestamp};

/// One live session plus its bookkeeping.
struct SessionEntry {
    session: AnnotationSession,
    /// When this session was created.
    created_at: Timestamp,
    /// Last time a handler touched the session; drives idle eviction.
    last_active: Instant,
}

/// Owns all live annotation sessions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Handlers hold the write lock for the
/// duration of one mutator, so mutations within a session are serialized
/// and run to completion in event order.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionManager {
    /// Create a new, empty manager.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a fresh session and return its id.
    pub async fn create(&self) -> SessionId {
        let id = SessionId::new_v4();
        let entry = SessionEntry {
            session: AnnotationSession::new(),
            created_at: chrono::Utc::now(),
            last_active: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        id
    }

    /// Remove a session by id. Returns whether it existed.
    pub async fn remove(&self, id: SessionId) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Creation time of a session, if it exists.
    pub async fn created_at(&self, id: SessionId) -> Option<Timestamp> {
        self.sessions.read().await.get(&id).map(|e| e.created_at)
    }

    /// Run `f` against the session, marking it active.
    ///
    /// All handler access goes through here, reads included, so any user
    /// interaction keeps the session alive.
    pub async fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut AnnotationSession) -> R,
    ) -> Result<R, CoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "Session",
            id,
        })?;
        entry.last_active = Instant::now();
        Ok(f(&mut entry.session))
    }

    /// Drop every session idle for longer than `max_idle`. Returns how many
    /// were evicted.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_active.elapsed() <= max_idle);
        before - sessions.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
