//! Typed reads and writes over the injected [`KeyValueStore`].
//!
//! Reads never fail: a missing key, an unavailable store, or a payload that does not decode all
//! read as absent. Writes report [`StorageError`] so callers can surface a retry.

use platform_host::{load_json_with, save_json_with, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;

/// Reads `key`, treating load and decode failures as absent.
pub(crate) fn read_optional<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match load_json_with(store, key) {
        Ok(value) => value,
        Err(_) => {
            // Payloads may hold credentials; log the key only.
            leptos::logging::warn!("stored `{key}` is unreadable; treating it as absent");
            None
        }
    }
}

/// Reads `key`, falling back to `T::default()` when absent or unreadable.
pub(crate) fn read_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    read_optional(store, key).unwrap_or_default()
}

/// Serializes and writes `value` under `key`.
pub(crate) fn write<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    save_json_with(store, key, value).map_err(|err| {
        leptos::logging::warn!("write of `{key}` failed: {err}");
        StorageError::new(key, err)
    })
}

/// Deletes `key`.
pub(crate) fn remove<S>(store: &S, key: &str) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    store.delete(key).map_err(|err| {
        leptos::logging::warn!("delete of `{key}` failed: {err}");
        StorageError::new(key, err)
    })
}
