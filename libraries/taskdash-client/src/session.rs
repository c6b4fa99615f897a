//! Session persistence.
//!
//! The signed-in user is kept in a key-value slot named `"user"` so it
//! survives restarts, and mirrored in a [`SessionContext`] that collaborators
//! receive explicitly.

use crate::error::{ClientError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use taskdash_core::{require, Action, Session};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Slot the session record is stored under
pub const SESSION_SLOT: &str = "user";

/// Persistent home for the sanitized session record.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Session store that forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| ClientError::Session("session slot lock poisoned".into()))?;
        Ok(slot.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ClientError::Session("session slot lock poisoned".into()))?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ClientError::Session("session slot lock poisoned".into()))?;
        *slot = None;
        Ok(())
    }
}

/// Session store backed by a JSON file of named slots.
///
/// Slots other than `"user"` are left as they are. A missing or corrupt
/// file reads as "no session".
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Map<String, Value> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(slots)) => slots,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "Session file is not a JSON object, ignoring");
                Map::new()
            }
        }
    }

    fn write_slots(&self, slots: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ClientError::Session(e.to_string()))?;
            }
        }
        let contents = serde_json::to_string_pretty(slots)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| ClientError::Session(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let Some(value) = self.read_slots().remove(SESSION_SLOT) else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "Stored session is malformed, ignoring");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut slots = self.read_slots();
        let value =
            serde_json::to_value(session).map_err(|e| ClientError::Session(e.to_string()))?;
        slots.insert(SESSION_SLOT.to_string(), value);
        self.write_slots(&slots)
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut slots = self.read_slots();
        slots.remove(SESSION_SLOT);
        self.write_slots(&slots)
    }
}

/// The current session, shared by everything that needs it.
///
/// Written only by login and logout, read by everyone else. The last write
/// wins.
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Create a context, restoring any session the store holds.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Failed to restore session");
                None
            }
        };

        if let Some(session) = &restored {
            debug!(username = %session.username, "Restored session");
        }

        Self {
            current: Arc::new(RwLock::new(restored)),
            store,
        }
    }

    /// A context that is not persisted.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Context persisted to `path`, or in memory when `None`.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(Arc::new(FileSessionStore::new(path))),
            None => Self::in_memory(),
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn set(&self, session: Session) -> Result<()> {
        let mut current = self.current.write().await;
        self.store.save(&session)?;
        *current = Some(session);
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        let mut current = self.current.write().await;
        *current = None;
        self.store.clear()
    }

    /// The current session, if it may perform `action`.
    pub async fn require(&self, action: Action) -> Result<Session> {
        let session = self
            .current()
            .await
            .ok_or_else(|| ClientError::PermissionDenied("not logged in".into()))?;
        require(&session, action)?;
        Ok(session)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
