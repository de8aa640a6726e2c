//! Account registration and credential checks.

use platform_host::{next_timestamp_id, KeyValueStore};
use serde::{Deserialize, Serialize};

use crate::config::{AccountPolicy, CatalogConfig};
use crate::credentials::{hash_password, verify_password};
use crate::error::{AccountError, ValidationError};
use crate::persistence;
use crate::session::SessionManager;

/// Unique, creation-time-derived account identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub u64);

/// Registered account record.
///
/// The credential is a salted verifier for new accounts and plaintext for records created by
/// older clients. Session copies carry no credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Login email; unique across accounts, compared case-sensitively.
    pub email: String,
    #[serde(
        rename = "password",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    credential: String,
}

impl Account {
    pub(crate) fn new(
        id: AccountId,
        name: impl Into<String>,
        email: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            credential: credential.into(),
        }
    }

    /// Returns a copy with the credential stripped.
    pub(crate) fn without_credential(&self) -> Self {
        Self {
            credential: String::new(),
            ..self.clone()
        }
    }

    fn accepts(&self, password: &str) -> bool {
        !self.credential.is_empty() && verify_password(&self.credential, password)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Registered-account list plus login, built over the injected store.
#[derive(Debug, Clone)]
pub struct AccountStore<S> {
    store: S,
    key: String,
    policy: AccountPolicy,
    session: SessionManager<S>,
}

impl<S: KeyValueStore + Clone> AccountStore<S> {
    /// Creates an account store and its session manager over `store`.
    pub fn new(store: S, config: &CatalogConfig) -> Self {
        Self {
            session: SessionManager::new(store.clone(), &config.storage),
            key: config.storage.accounts.clone(),
            policy: config.accounts.clone(),
            store,
        }
    }
}

impl<S: KeyValueStore> AccountStore<S> {
    /// Returns the session manager that registration and login write to.
    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    /// Returns every registered account in registration order, without credentials.
    pub fn accounts(&self) -> Vec<Account> {
        self.load()
            .iter()
            .map(Account::without_credential)
            .collect()
    }

    /// Looks up an account by exact email.
    pub fn find_by_email(&self, email: &str) -> Option<Account> {
        self.load()
            .iter()
            .find(|account| account.email == email)
            .map(Account::without_credential)
    }

    /// Registers a new account and makes it the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for empty fields, a mismatched confirmation, or a
    /// short password; [`AccountError::Conflict`] when the email is taken; and
    /// [`AccountError::Storage`] when persisting fails. When the session write fails the account
    /// list is restored, so a retry with the same email is not reported as a conflict.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Account, AccountError> {
        self.validate_registration(name, email, password, confirm_password)?;

        let mut accounts = self.load();
        if accounts.iter().any(|account| account.email == email) {
            return Err(AccountError::Conflict);
        }

        let floor = accounts.iter().map(|account| account.id.0).max().unwrap_or(0);
        let account = Account::new(
            AccountId(next_timestamp_id(floor)),
            name,
            email,
            hash_password(password),
        );
        let previous = accounts.clone();
        accounts.push(account.clone());
        persistence::write(&self.store, &self.key, &accounts)?;
        if let Err(err) = self.session.set(&account) {
            if persistence::write(&self.store, &self.key, &previous).is_err() {
                leptos::logging::warn!(
                    "account {} was kept after its session write failed",
                    account.id.0
                );
            }
            return Err(err.into());
        }
        leptos::logging::log!("registered account {}", account.id.0);
        Ok(account.without_credential())
    }

    /// Checks credentials and makes the matching account the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Auth`] for empty input or when no account matches both email and
    /// password, and [`AccountError::Storage`] when the session cannot be written.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError> {
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::Auth);
        }
        let account = self
            .load()
            .into_iter()
            .find(|account| account.email == email && account.accepts(password))
            .ok_or(AccountError::Auth)?;
        self.session.set(&account)?;
        Ok(account.without_credential())
    }

    fn validate_registration(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), ValidationError> {
        if [name, email, password, confirm_password]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ValidationError::MissingField);
        }
        if password != confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        let min = self.policy.min_password_len;
        if password.chars().count() < min {
            return Err(ValidationError::PasswordTooShort { min });
        }
        Ok(())
    }

    fn load(&self) -> Vec<Account> {
        persistence::read_or_default(&self.store, &self.key)
    }
}
