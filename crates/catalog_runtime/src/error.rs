//! Error taxonomy for account, session, and membership operations.
//!
//! Every variant is recoverable: callers re-prompt or offer a retry. There is no decode variant;
//! stored data that fails to parse is read as empty.

use thiserror::Error;

pub use catalog_contract::FetchError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Registration input rejected before any storage access.
pub enum ValidationError {
    /// One of the registration fields was empty.
    #[error("Please fill in all fields")]
    MissingField,
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Password is shorter than the configured minimum.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to write `{key}`: {message}")]
/// Durable store rejected a write or delete.
pub struct StorageError {
    /// Storage key being written.
    pub key: String,
    /// Host-reported cause.
    pub message: String,
}

impl StorageError {
    pub(crate) fn new(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures from registration and authentication.
pub enum AccountError {
    /// Registration input was incomplete or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An account with the same email already exists.
    #[error("User with this email already exists")]
    Conflict,
    /// Credentials did not match any stored account.
    #[error("Invalid email or password")]
    Auth,
    /// The account list or session could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
