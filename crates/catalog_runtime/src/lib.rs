//! Client core for browsing a remote movie catalog.
//!
//! The runtime owns everything a catalog client keeps between page loads: registered accounts,
//! the current session, the favorites and watch-later sets, and the paginated list view-model.
//! Persistence goes through an injected [`platform_host::KeyValueStore`]; catalog access goes
//! through an injected [`catalog_contract::CatalogService`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod accounts;
pub mod client;
pub mod config;
mod credentials;
pub mod error;
pub mod list_view;
pub mod membership;
pub mod pagination;
mod persistence;
pub mod session;

pub use accounts::{Account, AccountId, AccountStore};
pub use client::CatalogClient;
pub use config::{
    AccountPolicy, CatalogConfig, ConfigError, PaginationConfig, StorageKeys,
    DEFAULT_MIN_PASSWORD_LEN, DEFAULT_WINDOW_SIZE,
};
pub use error::{AccountError, FetchError, StorageError, ValidationError};
pub use list_view::{
    reduce_paged_list, ListPhase, LoadOutcome, PagedListAction, PagedListController,
    PagedListEffect, PagedListState, RequestToken, FETCH_FAILED_MESSAGE,
};
pub use membership::{MembershipFlags, MembershipSet, MembershipStore};
pub use pagination::{compute_window, NavControl, PageLink, PageNav, Pagination};
pub use session::SessionManager;
