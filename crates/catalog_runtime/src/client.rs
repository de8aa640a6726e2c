//! Composition root wiring one injected store and one catalog into the runtime surfaces.

use std::rc::Rc;

use catalog_contract::CatalogService;
use platform_host::KeyValueStore;

use crate::accounts::{Account, AccountStore};
use crate::config::CatalogConfig;
use crate::error::{AccountError, StorageError};
use crate::list_view::PagedListController;
use crate::membership::MembershipStore;
use crate::pagination::Pagination;
use crate::session::SessionManager;

/// Entry point for hosts: accounts, session, membership sets, and list controllers sharing one
/// store and one catalog.
#[derive(Clone)]
pub struct CatalogClient<S> {
    config: CatalogConfig,
    accounts: AccountStore<S>,
    membership: MembershipStore<S>,
    catalog: Rc<dyn CatalogService>,
}

impl<S: KeyValueStore + Clone> CatalogClient<S> {
    /// Builds a client from a validated config.
    pub fn new(store: S, catalog: Rc<dyn CatalogService>, config: CatalogConfig) -> Self {
        Self {
            accounts: AccountStore::new(store.clone(), &config),
            membership: MembershipStore::new(store, &config.storage),
            config,
            catalog,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns the account store.
    pub fn accounts(&self) -> &AccountStore<S> {
        &self.accounts
    }

    /// Returns the session manager.
    pub fn session(&self) -> &SessionManager<S> {
        self.accounts.session()
    }

    /// Returns the membership sets.
    pub fn membership(&self) -> &MembershipStore<S> {
        &self.membership
    }

    /// Returns the shared catalog collaborator.
    pub fn catalog(&self) -> Rc<dyn CatalogService> {
        Rc::clone(&self.catalog)
    }

    /// Registers an account; see [`AccountStore::register`].
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Account, AccountError> {
        self.accounts.register(name, email, password, confirm_password)
    }

    /// Logs in; see [`AccountStore::authenticate`].
    pub fn login(&self, email: &str, password: &str) -> Result<Account, AccountError> {
        self.accounts.authenticate(email, password)
    }

    /// Ends the current session. Membership sets are left untouched.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.session().clear()
    }

    /// Creates an idle list controller over the shared catalog.
    pub fn list_controller(&self) -> PagedListController {
        PagedListController::new(self.catalog(), self.config.pagination.window_size)
    }

    /// Builds a standalone navigation model with the configured window width.
    pub fn pagination(&self, current_page: u32, total_pages: u32) -> Pagination {
        Pagination::new(
            current_page,
            total_pages,
            self.config.pagination.window_size,
        )
    }
}
