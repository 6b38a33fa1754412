//! Application state for the listing API.
//!
//! Shared by every handler: the search repository, the session store, and
//! the server configuration.

use std::sync::Arc;

use helios_sorter::DefaultSort;
use helios_sorter::repository::SearchRepository;
use helios_sorter::session::{MemorySessionStore, SessionId, SessionStore};

use crate::config::ServerConfig;

/// Shared application state for the listing API.
///
/// # Type Parameters
///
/// * `R` - The search repository (must implement [`SearchRepository`])
/// * `T` - The session store, in-memory by default
///
/// # Example
///
/// ```rust
/// use helios_sorter::prelude::*;
/// use helios_sorter_rest::{AppState, ServerConfig};
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(InMemoryRepository::new()), ServerConfig::default());
/// assert_eq!(state.item_per_page(), 20);
/// ```
pub struct AppState<R, T = MemorySessionStore> {
    /// The search repository.
    repository: Arc<R>,

    /// Session storage.
    sessions: Arc<T>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Parsed once from the configuration.
    default_sort: Option<DefaultSort>,
}

// R and T sit behind Arc and need not be Clone
impl<R, T> Clone for AppState<R, T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            sessions: Arc::clone(&self.sessions),
            config: Arc::clone(&self.config),
            default_sort: self.default_sort.clone(),
        }
    }
}

impl<R: SearchRepository> AppState<R> {
    /// Creates a new AppState with an in-memory session store.
    pub fn new(repository: Arc<R>, config: ServerConfig) -> Self {
        Self::with_sessions(repository, Arc::new(MemorySessionStore::new()), config)
    }
}

impl<R: SearchRepository, T: SessionStore> AppState<R, T> {
    /// Creates a new AppState with the given session store.
    pub fn with_sessions(repository: Arc<R>, sessions: Arc<T>, config: ServerConfig) -> Self {
        let default_sort = config.default_sort();
        Self {
            repository,
            sessions,
            config: Arc::new(config),
            default_sort,
        }
    }

    /// Returns the session handle for `id`.
    pub fn session(&self, id: &SessionId) -> T::Handle {
        self.sessions.session(id)
    }
}

impl<R, T> AppState<R, T> {
    /// Returns a reference to the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns a reference to the session store.
    pub fn sessions(&self) -> &T {
        &self.sessions
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the default sort applied to every listing.
    pub fn default_sort(&self) -> Option<&DefaultSort> {
        self.default_sort.as_ref()
    }

    /// Returns the default page size.
    pub fn item_per_page(&self) -> usize {
        self.config.item_per_page
    }

    /// Returns the name of the session cookie.
    pub fn session_cookie(&self) -> &str {
        &self.config.session_cookie
    }
}
