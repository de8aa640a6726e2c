//! Process-wide session pointer persisted through the injected store.

use platform_host::KeyValueStore;

use crate::accounts::Account;
use crate::config::StorageKeys;
use crate::error::StorageError;
use crate::persistence;

/// Tracks the single authenticated account, if any.
///
/// The session holds a detached copy taken at login time. Later changes to the account list are
/// not reflected until the next [`SessionManager::set`].
#[derive(Debug, Clone)]
pub struct SessionManager<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Creates a session manager writing to the configured session key.
    pub fn new(store: S, keys: &StorageKeys) -> Self {
        Self {
            store,
            key: keys.session.clone(),
        }
    }

    /// Returns the current session account, or `None` when logged out or unreadable.
    pub fn current(&self) -> Option<Account> {
        persistence::read_optional(&self.store, &self.key)
    }

    /// Returns `true` when a session account is present.
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Persists a copy of `account` as the current session. The credential is not copied.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store rejects the write.
    pub fn set(&self, account: &Account) -> Result<(), StorageError> {
        persistence::write(&self.store, &self.key, &account.without_credential())
    }

    /// Removes the session pointer.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store rejects the delete.
    pub fn clear(&self) -> Result<(), StorageError> {
        persistence::remove(&self.store, &self.key)
    }
}
