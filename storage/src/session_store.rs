//! Conversation store: per-user sessions in memory, persisted wholesale to one JSON file.
//!
//! External: the sessions file (`{"<user_id>": Session, ...}`, pretty-printed UTF-8).
//! Persistence failures never escape as errors: `load` falls back to an empty map and `save`
//! leaves the file as it was; both log and report what happened through an outcome value.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use prompt::{ChatMessage, MessageRole};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, instrument, warn};

use crate::error::StoreError;
use crate::models::Session;
use crate::state::SessionState;

/// Result of [`ConversationStore::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// File read and parsed.
    Loaded { sessions: usize },
    /// No file yet; starting with an empty map.
    Fresh,
    /// File unreadable or corrupt; starting with an empty map.
    Degraded(StoreError),
}

/// Result of [`ConversationStore::save`].
#[derive(Debug)]
pub enum SaveOutcome {
    Saved { sessions: usize },
    Failed(StoreError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

/// Owns `user_id → Session`. Shared between handlers behind an `Arc`.
///
/// The sessions lock is held only for in-memory work; file IO happens on a snapshot.
/// Saves are serialized by `save_lock`, so concurrent callers never share the temporary file.
#[derive(Debug)]
pub struct ConversationStore {
    path: PathBuf,
    sessions: RwLock<BTreeMap<i64, Session>>,
    save_lock: Mutex<()>,
}

impl ConversationStore {
    /// Empty store bound to `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sessions: RwLock::new(BTreeMap::new()),
            save_lock: Mutex::new(()),
        }
    }

    /// Creates the store and loads `path`.
    pub async fn open(path: impl Into<PathBuf>) -> (Self, LoadOutcome) {
        let store = Self::new(path);
        let outcome = store.load().await;
        (store, outcome)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory map with the file contents, or with an empty map on any failure.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> LoadOutcome {
        let (map, outcome) = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<BTreeMap<i64, Session>>(&content) {
                Ok(map) => {
                    let sessions = map.len();
                    info!(sessions, "Loaded sessions");
                    (map, LoadOutcome::Loaded { sessions })
                }
                Err(source) => {
                    let e = StoreError::Parse {
                        path: self.path.clone(),
                        source,
                    };
                    error!(error = %e, "Error loading sessions, starting empty");
                    (BTreeMap::new(), LoadOutcome::Degraded(e))
                }
            },
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing sessions file, starting fresh");
                (BTreeMap::new(), LoadOutcome::Fresh)
            }
            Err(source) => {
                let e = StoreError::Io {
                    path: self.path.clone(),
                    source,
                };
                error!(error = %e, "Error loading sessions, starting empty");
                (BTreeMap::new(), LoadOutcome::Degraded(e))
            }
        };
        *self.sessions.write().await = map;
        outcome
    }

    /// Writes the whole map. The file is replaced via a temporary sibling and rename.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn save(&self) -> SaveOutcome {
        // Held across snapshot, write and rename; a later save always writes a later snapshot.
        let _save_guard = self.save_lock.lock().await;
        let (json, sessions) = {
            let guard = self.sessions.read().await;
            (serde_json::to_string_pretty(&*guard), guard.len())
        };
        let outcome = match json {
            Ok(json) => match self.write_file(json.as_bytes()).await {
                Ok(()) => SaveOutcome::Saved { sessions },
                Err(e) => SaveOutcome::Failed(e),
            },
            Err(e) => SaveOutcome::Failed(StoreError::Serialize(e)),
        };
        match &outcome {
            SaveOutcome::Saved { sessions } => info!(sessions, "Saved sessions"),
            SaveOutcome::Failed(e) => error!(error = %e, "Error saving sessions"),
        }
        outcome
    }

    async fn write_file(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }

    /// Snapshot of the user's session, if one exists.
    pub async fn get(&self, user_id: i64) -> Option<Session> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    /// Starts a fresh session, replacing any existing one. Does not persist.
    pub async fn create(&self, user_id: i64) -> Session {
        let session = Session::new(user_id);
        let replaced = self
            .sessions
            .write()
            .await
            .insert(user_id, session.clone())
            .is_some();
        info!(user_id, replaced, "Created new session");
        session
    }

    /// Replaces the user's session wholesale and persists.
    pub async fn update(&self, user_id: i64, session: Session) -> SaveOutcome {
        self.sessions.write().await.insert(user_id, session);
        self.save().await
    }

    /// Removes the user's session and persists. Returns false (and writes nothing) if there was none.
    pub async fn delete(&self, user_id: i64) -> bool {
        let removed = self.sessions.write().await.remove(&user_id).is_some();
        if removed {
            self.save().await;
            info!(user_id, "Deleted session");
        }
        removed
    }

    /// Appends an entry and bumps `message_count`. No-op (returns false) without a session. Does not persist.
    pub async fn add_message(&self, user_id: i64, role: MessageRole, content: &str) -> bool {
        match self.sessions.write().await.get_mut(&user_id) {
            Some(session) => {
                session.push(role, content);
                true
            }
            None => {
                warn!(user_id, role = %role, "add_message without session ignored");
                false
            }
        }
    }

    /// Overwrites the state without checking the transition. No-op (returns false) without a session. Does not persist.
    pub async fn set_state(&self, user_id: i64, state: SessionState) -> bool {
        match self.sessions.write().await.get_mut(&user_id) {
            Some(session) => {
                session.state = state;
                true
            }
            None => false,
        }
    }

    /// History of the user's session; empty without a session.
    pub async fn messages(&self, user_id: i64) -> Vec<ChatMessage> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .map(|s| s.messages.clone())
            .unwrap_or_default()
    }

    pub async fn state(&self, user_id: i64) -> Option<SessionState> {
        self.sessions.read().await.get(&user_id).map(|s| s.state)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
