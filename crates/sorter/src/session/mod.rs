//! Session storage.
//!
//! A [`SessionStore`] hands out [`Session`] handles, each scoped to one
//! user session. Handles are small key-value views whose writes are visible
//! to later requests of the same session.
//!
//! ```
//! use helios_sorter::session::{MemorySessionStore, Session, SessionId, SessionStore};
//! use serde_json::json;
//!
//! let store = MemorySessionStore::new();
//! let session = store.session(&SessionId::new("abc"));
//! session.set("greeting", json!("hello")).unwrap();
//!
//! let again = store.session(&SessionId::new("abc"));
//! assert_eq!(again.get("greeting").unwrap(), Some(json!("hello")));
//! ```

mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionResult;

pub use memory::{MemorySession, MemorySessionStore};

/// Identifies a user session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value storage scoped to one user session.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability. Concurrent writers of the same session are not coordinated:
/// the last write wins.
pub trait Session {
    /// Returns true if `key` holds a value.
    fn has(&self, key: &str) -> SessionResult<bool>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> SessionResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> SessionResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> SessionResult<()>;
}

/// A source of per-session handles.
pub trait SessionStore: Send + Sync {
    /// The handle type.
    type Handle: Session;

    /// Returns the handle for the given session.
    fn session(&self, id: &SessionId) -> Self::Handle;
}
