//! In-memory session store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::SessionResult;

use super::{Session, SessionId, SessionStore};

type SessionMap = HashMap<SessionId, HashMap<String, Value>>;

/// Process-local session store.
///
/// Cloning is cheap and clones share the same sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<SessionMap>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of sessions holding at least one key.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .values()
            .filter(|values| !values.is_empty())
            .count()
    }

    /// Returns true if no session holds any value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops everything stored for `id`.
    pub fn clear(&self, id: &SessionId) {
        self.sessions.write().remove(id);
    }
}

impl SessionStore for MemorySessionStore {
    type Handle = MemorySession;

    fn session(&self, id: &SessionId) -> MemorySession {
        MemorySession {
            sessions: Arc::clone(&self.sessions),
            id: id.clone(),
        }
    }
}

/// Handle on one session of a [`MemorySessionStore`].
#[derive(Debug, Clone)]
pub struct MemorySession {
    sessions: Arc<RwLock<SessionMap>>,
    id: SessionId,
}

impl MemorySession {
    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }
}

impl Session for MemorySession {
    fn has(&self, key: &str) -> SessionResult<bool> {
        Ok(self
            .sessions
            .read()
            .get(&self.id)
            .is_some_and(|values| values.contains_key(key)))
    }

    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        Ok(self
            .sessions
            .read()
            .get(&self.id)
            .and_then(|values| values.get(key))
            .cloned())
    }

    fn set(&self, key: &str, value: Value) -> SessionResult<()> {
        self.sessions
            .write()
            .entry(self.id.clone())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        if let Some(values) = self.sessions.write().get_mut(&self.id) {
            values.remove(key);
        }
        Ok(())
    }
}
