//! Paginated list view-model: reducer, state, and the async controller that drives fetches.
//!
//! A list moves `Idle -> Loading -> Ready | Failed` and re-enters `Loading` whenever the query or
//! page changes. Every load is stamped with a [`RequestToken`]; completions carrying anything but
//! the latest token are dropped, so a slow response for an abandoned page can never overwrite a
//! newer one.

use std::{cell::RefCell, future::Future, rc::Rc};

use catalog_contract::{CatalogPage, CatalogQuery, CatalogService, FetchError, MovieStub};
use futures::future::LocalBoxFuture;

use crate::pagination::{PageNav, Pagination};

/// Message shown when a list fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch movies. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Monotonic stamp identifying one issued load.
pub struct RequestToken(pub u64);

#[derive(Debug, Clone, Default, PartialEq)]
/// Lifecycle phase of a list.
pub enum ListPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch succeeded.
    Ready,
    /// The latest fetch failed.
    Failed(FetchError),
}

#[derive(Debug, Clone, PartialEq)]
/// Transient list state; rebuilt from fetches and never persisted.
pub struct PagedListState {
    /// Feed being browsed.
    pub query: Option<CatalogQuery>,
    /// Lifecycle phase.
    pub phase: ListPhase,
    /// Results of the last applied fetch.
    pub items: Vec<MovieStub>,
    /// Page the items belong to (1-indexed).
    pub current_page: u32,
    /// Total pages reported by the last applied fetch (at least 1).
    pub total_pages: u32,
    /// Page of the most recently issued load.
    pub requested_page: u32,
    latest_token: RequestToken,
}

impl Default for PagedListState {
    fn default() -> Self {
        Self {
            query: None,
            phase: ListPhase::Idle,
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            requested_page: 1,
            latest_token: RequestToken::default(),
        }
    }
}

impl PagedListState {
    /// Returns the token of the most recently issued load.
    pub fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// Returns `true` when the latest fetch succeeded with no results.
    pub fn is_empty_result(&self) -> bool {
        self.phase == ListPhase::Ready && self.items.is_empty()
    }

    /// Returns the user-facing failure message when the latest fetch failed.
    pub fn error_message(&self) -> Option<&'static str> {
        matches!(self.phase, ListPhase::Failed(_)).then_some(FETCH_FAILED_MESSAGE)
    }

    /// Builds the navigation model for the current page.
    pub fn pagination(&self, window_size: u32) -> Pagination {
        Pagination::new(self.current_page, self.total_pages, window_size)
    }

    fn begin_load(&mut self, query: CatalogQuery, page: u32) -> PagedListEffect {
        let page = page.max(1);
        self.latest_token = RequestToken(self.latest_token.0 + 1);
        self.query = Some(query.clone());
        self.requested_page = page;
        self.phase = ListPhase::Loading;
        PagedListEffect::Fetch {
            token: self.latest_token,
            query,
            page,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_paged_list`].
pub enum PagedListAction {
    /// Start loading `page` of `query`.
    Load {
        /// Feed to browse.
        query: CatalogQuery,
        /// Requested page (values below 1 request page 1).
        page: u32,
    },
    /// Move relative to the current page, or to the page in flight while loading.
    Navigate(PageNav),
    /// A fetch completed.
    FetchSucceeded {
        /// Token the fetch was issued with.
        token: RequestToken,
        /// Catalog response.
        page: CatalogPage,
    },
    /// A fetch was rejected.
    FetchFailed {
        /// Token the fetch was issued with.
        token: RequestToken,
        /// Collaborator failure.
        error: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_paged_list`].
pub enum PagedListEffect {
    /// Fetch `page` of `query` and report back with `token`.
    Fetch {
        /// Token to echo in the completion action.
        token: RequestToken,
        /// Feed to fetch.
        query: CatalogQuery,
        /// Page to fetch.
        page: u32,
    },
}

/// Applies a [`PagedListAction`] and collects the fetches the caller must issue.
///
/// Navigation is relative to the page in flight while loading and to the current page otherwise.
/// Navigation that would leave the page range, stay on its base page, or happen before any query
/// was loaded is ignored. Completions with a stale token are discarded without touching
/// state.
pub fn reduce_paged_list(
    state: &mut PagedListState,
    action: PagedListAction,
) -> Vec<PagedListEffect> {
    match action {
        PagedListAction::Load { query, page } => vec![state.begin_load(query, page)],
        PagedListAction::Navigate(nav) => {
            let Some(query) = state.query.clone() else {
                return Vec::new();
            };
            let base = if state.is_loading() {
                state.requested_page
            } else {
                state.current_page
            };
            match nav.target(base, state.total_pages) {
                Some(page) => vec![state.begin_load(query, page)],
                None => Vec::new(),
            }
        }
        PagedListAction::FetchSucceeded { token, page } => {
            if token != state.latest_token {
                leptos::logging::log!("discarding stale page {} (request {})", page.page, token.0);
                return Vec::new();
            }
            let total_pages = page.normalized_total_pages();
            state.items = page.results;
            state.total_pages = total_pages;
            state.current_page = state.requested_page.min(total_pages);
            state.phase = ListPhase::Ready;
            Vec::new()
        }
        PagedListAction::FetchFailed { token, error } => {
            if token != state.latest_token {
                return Vec::new();
            }
            leptos::logging::warn!("list fetch failed: {error}");
            state.phase = ListPhase::Failed(error);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a driven load ended.
pub enum LoadOutcome {
    /// Results were applied; the list is `Ready`.
    Ready,
    /// The failure was applied; the list is `Failed`.
    Failed,
    /// A newer load was issued first; the completion was discarded.
    Superseded,
}

/// Drives [`reduce_paged_list`] against a catalog collaborator.
///
/// State lives behind `Rc<RefCell<_>>`: loads run on one cooperative thread and several may be in
/// flight at once, each applying its result only if still the latest.
#[derive(Clone)]
pub struct PagedListController {
    state: Rc<RefCell<PagedListState>>,
    catalog: Rc<dyn CatalogService>,
    window_size: u32,
}

impl PagedListController {
    /// Creates an idle controller fetching from `catalog`.
    pub fn new(catalog: Rc<dyn CatalogService>, window_size: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(PagedListState::default())),
            catalog,
            window_size,
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> PagedListState {
        self.state.borrow().clone()
    }

    /// Returns the navigation model for the current page.
    pub fn pagination(&self) -> Pagination {
        self.state.borrow().pagination(self.window_size)
    }

    /// Applies `action` directly.
    pub fn dispatch(&self, action: PagedListAction) -> Vec<PagedListEffect> {
        reduce_paged_list(&mut self.state.borrow_mut(), action)
    }

    /// Enters `Loading` for `page` of `query`, calls `fetch` once with the page, and returns a
    /// future that applies the outcome.
    ///
    /// The transition and the call to `fetch` happen before this returns; only applying the
    /// result waits on the returned future.
    pub fn load_with<F, Fut>(
        &self,
        query: CatalogQuery,
        page: u32,
        fetch: F,
    ) -> LocalBoxFuture<'static, LoadOutcome>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<CatalogPage, FetchError>> + 'static,
    {
        let effect = self.state.borrow_mut().begin_load(query, page);
        let PagedListEffect::Fetch { token, page, .. } = effect;
        self.complete(token, fetch(page))
    }

    /// Loads `page` of `query` from the injected catalog.
    pub fn load(&self, query: CatalogQuery, page: u32) -> LocalBoxFuture<'static, LoadOutcome> {
        let catalog = Rc::clone(&self.catalog);
        let fetch_query = query.clone();
        self.load_with(query, page, move |page| async move {
            catalog.fetch_page(&fetch_query, page).await
        })
    }

    /// Navigates within the current query; `None` when the request is a no-op.
    pub fn navigate(&self, nav: PageNav) -> Option<LocalBoxFuture<'static, LoadOutcome>> {
        let effects = self.dispatch(PagedListAction::Navigate(nav));
        effects.into_iter().next().map(|effect| self.issue(effect))
    }

    /// Re-issues the last requested page after a failure; `None` unless the list is `Failed`.
    pub fn retry(&self) -> Option<LocalBoxFuture<'static, LoadOutcome>> {
        let (query, page) = {
            let state = self.state.borrow();
            if !matches!(state.phase, ListPhase::Failed(_)) {
                return None;
            }
            (state.query.clone()?, state.requested_page)
        };
        Some(self.load(query, page))
    }

    fn issue(&self, effect: PagedListEffect) -> LocalBoxFuture<'static, LoadOutcome> {
        let PagedListEffect::Fetch { token, query, page } = effect;
        let catalog = Rc::clone(&self.catalog);
        self.complete(token, async move { catalog.fetch_page(&query, page).await })
    }

    fn complete<Fut>(&self, token: RequestToken, fetch: Fut) -> LocalBoxFuture<'static, LoadOutcome>
    where
        Fut: Future<Output = Result<CatalogPage, FetchError>> + 'static,
    {
        let state = Rc::clone(&self.state);
        Box::pin(async move {
            let result = fetch.await;
            let mut state = state.borrow_mut();
            if state.latest_token() != token {
                reduce_paged_list(
                    &mut state,
                    match result {
                        Ok(page) => PagedListAction::FetchSucceeded { token, page },
                        Err(error) => PagedListAction::FetchFailed { token, error },
                    },
                );
                return LoadOutcome::Superseded;
            }
            match result {
                Ok(page) => {
                    reduce_paged_list(&mut state, PagedListAction::FetchSucceeded { token, page });
                    LoadOutcome::Ready
                }
                Err(error) => {
                    reduce_paged_list(&mut state, PagedListAction::FetchFailed { token, error });
                    LoadOutcome::Failed
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use catalog_contract::{MemoryCatalogService, NoopCatalogService};
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn movies(range: std::ops::RangeInclusive<u64>) -> Vec<MovieStub> {
        range
            .map(|id| MovieStub::new(id, format!("Movie {id}")))
            .collect()
    }

    fn fetched(page: u32, total_pages: u32) -> CatalogPage {
        let first = u64::from(page) * 10;
        CatalogPage::new(page, movies(first..=first + 1), total_pages)
    }

    #[test]
    fn reducer_moves_through_loading_to_ready() {
        let mut state = PagedListState::default();
        assert_eq!(state.phase, ListPhase::Idle);

        let effects = reduce_paged_list(
            &mut state,
            PagedListAction::Load {
                query: CatalogQuery::Popular,
                page: 2,
            },
        );
        let token = state.latest_token();
        assert_eq!(
            effects,
            vec![PagedListEffect::Fetch {
                token,
                query: CatalogQuery::Popular,
                page: 2
            }]
        );
        assert!(state.is_loading());

        reduce_paged_list(
            &mut state,
            PagedListAction::FetchSucceeded {
                token,
                page: fetched(2, 8),
            },
        );
        assert_eq!(state.phase, ListPhase::Ready);
        assert_eq!(state.current_page, 2);
        assert_eq!(state.total_pages, 8);
        assert_eq!(state.items, movies(20..=21));
    }

    #[test]
    fn reducer_discards_stale_completions() {
        let mut state = PagedListState::default();
        let load = |page| PagedListAction::Load {
            query: CatalogQuery::TopRated,
            page,
        };
        reduce_paged_list(&mut state, load(2));
        let stale = state.latest_token();
        reduce_paged_list(&mut state, load(3));
        let fresh = state.latest_token();
        assert!(fresh > stale);

        reduce_paged_list(
            &mut state,
            PagedListAction::FetchSucceeded {
                token: fresh,
                page: fetched(3, 9),
            },
        );
        let ready = state.clone();
        reduce_paged_list(
            &mut state,
            PagedListAction::FetchSucceeded {
                token: stale,
                page: fetched(2, 9),
            },
        );
        reduce_paged_list(
            &mut state,
            PagedListAction::FetchFailed {
                token: stale,
                error: FetchError::new("late failure"),
            },
        );
        assert_eq!(state, ready);
        assert_eq!(state.current_page, 3);
    }

    #[test]
    fn reducer_records_failure_and_message() {
        let mut state = PagedListState::default();
        reduce_paged_list(
            &mut state,
            PagedListAction::Load {
                query: CatalogQuery::Upcoming,
                page: 1,
            },
        );
        let token = state.latest_token();
        reduce_paged_list(
            &mut state,
            PagedListAction::FetchFailed {
                token,
                error: FetchError::new("503"),
            },
        );
        assert_eq!(state.phase, ListPhase::Failed(FetchError::new("503")));
        assert_eq!(state.error_message(), Some(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn reducer_normalizes_zero_total_pages_and_clamps_page() {
        let mut state = PagedListState::default();
        reduce_paged_list(
            &mut state,
            PagedListAction::Load {
                query: CatalogQuery::Search {
                    query: "zzzz".to_string(),
                },
                page: 4,
            },
        );
        let token = state.latest_token();
        reduce_paged_list(
            &mut state,
            PagedListAction::FetchSucceeded {
                token,
                page: CatalogPage::new(4, Vec::new(), 0),
            },
        );
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.current_page, 1);
        assert!(state.is_empty_result());
        assert!(!state.pagination(5).visible);
    }

    #[test]
    fn navigation_is_ignored_before_first_load_and_at_boundaries() {
        let mut state = PagedListState::default();
        assert!(reduce_paged_list(&mut state, PagedListAction::Navigate(PageNav::Next)).is_empty());

        reduce_paged_list(
            &mut state,
            PagedListAction::Load {
                query: CatalogQuery::Popular,
                page: 1,
            },
        );
        let token = state.latest_token();
        reduce_paged_list(
            &mut state,
            PagedListAction::FetchSucceeded {
                token,
                page: fetched(1, 3),
            },
        );
        assert!(reduce_paged_list(&mut state, PagedListAction::Navigate(PageNav::Prev)).is_empty());
        assert!(reduce_paged_list(&mut state, PagedListAction::Navigate(PageNav::First)).is_empty());
        assert_eq!(state.phase, ListPhase::Ready);

        let effects = reduce_paged_list(&mut state, PagedListAction::Navigate(PageNav::Last));
        assert_eq!(
            effects,
            vec![PagedListEffect::Fetch {
                token: state.latest_token(),
                query: CatalogQuery::Popular,
                page: 3
            }]
        );
    }

    #[test]
    fn rapid_navigation_steps_from_the_page_in_flight() {
        let mut state = PagedListState::default();
        reduce_paged_list(
            &mut state,
            PagedListAction::Load {
                query: CatalogQuery::Popular,
                page: 1,
            },
        );
        let token = state.latest_token();
        reduce_paged_list(
            &mut state,
            PagedListAction::FetchSucceeded {
                token,
                page: fetched(1, 3),
            },
        );

        let pages: Vec<u32> = (0..3)
            .flat_map(|_| reduce_paged_list(&mut state, PagedListAction::Navigate(PageNav::Next)))
            .map(|PagedListEffect::Fetch { page, .. }| page)
            .collect();
        assert_eq!(pages, vec![2, 3]);
        assert_eq!(state.requested_page, 3);
        assert_eq!(state.current_page, 1);

        let token = state.latest_token();
        reduce_paged_list(
            &mut state,
            PagedListAction::FetchSucceeded {
                token,
                page: fetched(3, 3),
            },
        );
        assert_eq!(state.current_page, 3);
        let effects = reduce_paged_list(&mut state, PagedListAction::Navigate(PageNav::Prev));
        assert_eq!(
            effects,
            vec![PagedListEffect::Fetch {
                token: state.latest_token(),
                query: CatalogQuery::Popular,
                page: 2
            }]
        );
    }

    #[test]
    fn controller_applies_only_the_latest_of_overlapping_loads() {
        let controller = PagedListController::new(Rc::new(NoopCatalogService), 5);
        let (page_two_tx, page_two_rx) = oneshot::channel();
        let (page_three_tx, page_three_rx) = oneshot::channel();

        let page_two = controller.load_with(CatalogQuery::Popular, 2, move |_| async move {
            page_two_rx.await.unwrap_or_else(|_| Err(FetchError::new("dropped")))
        });
        let page_three = controller.load_with(CatalogQuery::Popular, 3, move |_| async move {
            page_three_rx.await.unwrap_or_else(|_| Err(FetchError::new("dropped")))
        });
        assert!(controller.state().is_loading());

        page_three_tx.send(Ok(fetched(3, 10))).expect("send page 3");
        assert_eq!(block_on(page_three), LoadOutcome::Ready);

        page_two_tx.send(Ok(fetched(2, 10))).expect("send page 2");
        assert_eq!(block_on(page_two), LoadOutcome::Superseded);

        let state = controller.state();
        assert_eq!(state.phase, ListPhase::Ready);
        assert_eq!(state.current_page, 3);
        assert_eq!(state.items, movies(30..=31));
    }

    #[test]
    fn controller_keeps_loading_when_stale_result_arrives_first() {
        let controller = PagedListController::new(Rc::new(NoopCatalogService), 5);
        let (page_two_tx, page_two_rx) = oneshot::channel();
        let (page_three_tx, page_three_rx) = oneshot::channel();

        let page_two = controller.load_with(CatalogQuery::Popular, 2, move |_| async move {
            page_two_rx.await.unwrap_or_else(|_| Err(FetchError::new("dropped")))
        });
        let page_three = controller.load_with(CatalogQuery::Popular, 3, move |_| async move {
            page_three_rx.await.unwrap_or_else(|_| Err(FetchError::new("dropped")))
        });

        page_two_tx.send(Err(FetchError::new("timeout"))).expect("send page 2");
        assert_eq!(block_on(page_two), LoadOutcome::Superseded);
        assert!(controller.state().is_loading());

        page_three_tx.send(Ok(fetched(3, 10))).expect("send page 3");
        assert_eq!(block_on(page_three), LoadOutcome::Ready);
        assert_eq!(controller.state().current_page, 3);
    }

    #[test]
    fn controller_calls_fetch_exactly_once_per_load() {
        let catalog = MemoryCatalogService::new(2);
        catalog.set_feed(CatalogQuery::NowPlaying, movies(1..=5));
        let controller = PagedListController::new(Rc::new(catalog.clone()), 5);

        assert_eq!(
            block_on(controller.load(CatalogQuery::NowPlaying, 2)),
            LoadOutcome::Ready
        );
        assert_eq!(catalog.page_requests(), vec![(CatalogQuery::NowPlaying, 2)]);
        assert_eq!(controller.state().items, movies(3..=4));
        assert_eq!(controller.pagination().total_pages, 3);
    }

    #[test]
    fn controller_navigates_and_retries() {
        let catalog = MemoryCatalogService::new(1);
        catalog.set_feed(CatalogQuery::Popular, movies(1..=4));
        let controller = PagedListController::new(Rc::new(catalog.clone()), 5);
        block_on(controller.load(CatalogQuery::Popular, 1));

        assert!(controller.navigate(PageNav::Prev).is_none());
        let next = controller.navigate(PageNav::Next).expect("next page");
        assert_eq!(block_on(next), LoadOutcome::Ready);
        assert_eq!(controller.state().current_page, 2);

        catalog.fail_with("offline");
        let last = controller.navigate(PageNav::Last).expect("last page");
        assert_eq!(block_on(last), LoadOutcome::Failed);
        assert!(controller.state().error_message().is_some());

        catalog.recover();
        let retry = controller.retry().expect("retry after failure");
        assert_eq!(block_on(retry), LoadOutcome::Ready);
        assert_eq!(controller.state().current_page, 4);
        assert!(controller.retry().is_none());
    }

    #[test]
    fn changing_query_reenters_loading() {
        let catalog = MemoryCatalogService::new(5);
        catalog.set_feed(CatalogQuery::Popular, movies(1..=3));
        let controller = PagedListController::new(Rc::new(catalog), 5);
        block_on(controller.load(CatalogQuery::Popular, 1));

        let search = controller.load(
            CatalogQuery::Search {
                query: "heat".to_string(),
            },
            1,
        );
        assert!(controller.state().is_loading());
        assert_eq!(block_on(search), LoadOutcome::Ready);
        assert!(controller.state().is_empty_result());
    }
}
