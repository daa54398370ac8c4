//! In-memory store of saved configurations, keyed by session id.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::SessionsConfig;
use crate::models::SavedConfiguration;

/// Session store errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// No saved configuration at that index for the session.
    #[error("configuration {index} not found")]
    NotFound {
        /// Requested index.
        index: usize,
    },

    /// The session already holds the maximum number of configurations.
    #[error("session already holds {limit} saved configurations")]
    LimitReached {
        /// Per-session capacity.
        limit: usize,
    },
}

/// Saved entries of one session.
#[derive(Debug, Default)]
struct Session {
    entries: Vec<SavedConfiguration>,
    /// Store tick of the last write; lowest is evicted first.
    last_write: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    by_id: HashMap<Uuid, Session>,
    tick: u64,
}

impl Sessions {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Drop least recently written sessions until one more fits.
    fn make_room(&mut self, max_sessions: usize) {
        while self.by_id.len() >= max_sessions {
            let Some(oldest) = self
                .by_id
                .iter()
                .min_by_key(|(_, session)| session.last_write)
                .map(|(id, _)| *id)
            else {
                return;
            };
            self.by_id.remove(&oldest);
            tracing::debug!(session = %oldest, "Session evicted");
        }
    }
}

/// Ordered saved configurations per session.
///
/// Both the entries per session and the number of live sessions are bounded.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<Sessions>,
    max_saved: usize,
    max_sessions: usize,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(config: &SessionsConfig) -> Self {
        Self {
            sessions: RwLock::new(Sessions::default()),
            max_saved: config.max_saved,
            max_sessions: config.max_sessions,
        }
    }

    /// Append a configuration, creating a session when `session` is `None`
    /// or no longer live.
    ///
    /// Creating a session in a full store evicts the session written to
    /// least recently. Returns the session id and the index of the saved
    /// entry.
    ///
    /// # Errors
    ///
    /// [`SessionError::LimitReached`] when the session is full.
    pub async fn save(
        &self,
        session: Option<Uuid>,
        saved: SavedConfiguration,
    ) -> Result<(Uuid, usize), SessionError> {
        let id = session.unwrap_or_else(Uuid::new_v4);
        let mut sessions = self.sessions.write().await;

        if !sessions.by_id.contains_key(&id) {
            sessions.make_room(self.max_sessions);
        }
        let tick = sessions.next_tick();
        let entry = sessions.by_id.entry(id).or_default();

        if entry.entries.len() >= self.max_saved {
            return Err(SessionError::LimitReached {
                limit: self.max_saved,
            });
        }

        entry.entries.push(saved);
        entry.last_write = tick;
        let index = entry.entries.len() - 1;
        tracing::debug!(session = %id, index, "Configuration saved");
        Ok((id, index))
    }

    /// All saved configurations for a session, oldest first.
    pub async fn list(&self, session: Uuid) -> Vec<SavedConfiguration> {
        self.sessions
            .read()
            .await
            .by_id
            .get(&session)
            .map(|s| s.entries.clone())
            .unwrap_or_default()
    }

    /// The configuration at `index`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] for unknown sessions or out-of-range indices.
    pub async fn load(&self, session: Uuid, index: usize) -> Result<SavedConfiguration, SessionError> {
        self.sessions
            .read()
            .await
            .by_id
            .get(&session)
            .and_then(|s| s.entries.get(index))
            .cloned()
            .ok_or(SessionError::NotFound { index })
    }

    /// Remove and return the configuration at `index`; later entries shift down.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] for unknown sessions or out-of-range indices.
    pub async fn delete(&self, session: Uuid, index: usize) -> Result<SavedConfiguration, SessionError> {
        let mut sessions = self.sessions.write().await;
        let tick = sessions.next_tick();
        let entry = sessions
            .by_id
            .get_mut(&session)
            .filter(|s| index < s.entries.len())
            .ok_or(SessionError::NotFound { index })?;

        let removed = entry.entries.remove(index);
        entry.last_write = tick;
        tracing::debug!(session = %session, index, "Configuration deleted");
        Ok(removed)
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.by_id.len()
    }
}
