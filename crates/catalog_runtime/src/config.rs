//! Typed runtime configuration.
//!
//! Every field has a default, so an empty TOML document (or no document at all) yields the
//! layout used by existing client installs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page-window width for pagination controls.
pub const DEFAULT_WINDOW_SIZE: u32 = 5;
/// Default minimum password length accepted by registration.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Configuration loading or validation failure.
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {message}")]
    Read {
        /// Path that was read.
        path: String,
        /// I/O cause.
        message: String,
    },
    /// The document is not valid TOML for [`CatalogConfig`].
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// The document parsed but describes an unusable configuration.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Key names of the four persisted records.
pub struct StorageKeys {
    /// Registered account list.
    pub accounts: String,
    /// Current session account.
    pub session: String,
    /// Favorites membership set.
    pub favorites: String,
    /// Watch-later membership set.
    pub watch_later: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            accounts: "users".to_string(),
            session: "currentUser".to_string(),
            favorites: "favorites".to_string(),
            watch_later: "watchLater".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Pagination control settings.
pub struct PaginationConfig {
    /// Number of page links shown around the current page.
    pub window_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Registration policy.
pub struct AccountPolicy {
    /// Minimum password length in characters.
    pub min_password_len: usize,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Root runtime configuration.
pub struct CatalogConfig {
    /// Persisted record key names.
    pub storage: StorageKeys,
    /// Pagination settings.
    pub pagination: PaginationConfig,
    /// Registration policy.
    pub accounts: AccountPolicy,
}

impl CatalogConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] when [`Self::validate`] rejects the result.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file is unreadable, otherwise the errors of
    /// [`Self::from_toml_str`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Checks semantic constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty or duplicated storage key, a zero window
    /// size, or a zero minimum password length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = [
            ("accounts", &self.storage.accounts),
            ("session", &self.storage.session),
            ("favorites", &self.storage.favorites),
            ("watch_later", &self.storage.watch_later),
        ];
        for (index, (name, key)) in keys.iter().enumerate() {
            if key.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "storage.{name} must not be empty"
                )));
            }
            if let Some((other, _)) = keys[..index].iter().find(|(_, k)| k == key) {
                return Err(ConfigError::Invalid(format!(
                    "storage.{name} reuses the key of storage.{other}"
                )));
            }
        }
        if self.pagination.window_size == 0 {
            return Err(ConfigError::Invalid(
                "pagination.window_size must be at least 1".to_string(),
            ));
        }
        if self.accounts.min_password_len == 0 {
            return Err(ConfigError::Invalid(
                "accounts.min_password_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
