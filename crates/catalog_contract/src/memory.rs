//! In-process catalog adapters for tests and hosts without network transport.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    CatalogFuture, CatalogPage, CatalogQuery, CatalogService, FetchError, Genre, MovieDetail,
    MovieId, MovieStub,
};

#[derive(Debug, Clone, Copy, Default)]
/// Catalog that answers every list query with a single empty page.
pub struct NoopCatalogService;

impl CatalogService for NoopCatalogService {
    fn fetch_page<'a>(
        &'a self,
        _query: &'a CatalogQuery,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, FetchError>> {
        Box::pin(async move { Ok(CatalogPage::new(page, Vec::new(), 1)) })
    }

    fn fetch_detail(&self, movie_id: MovieId) -> CatalogFuture<'_, Result<MovieDetail, FetchError>> {
        Box::pin(async move { Err(FetchError::new(format!("movie {movie_id} not found"))) })
    }

    fn fetch_genres(&self) -> CatalogFuture<'_, Result<Vec<Genre>, FetchError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Default)]
struct MemoryCatalogInner {
    feeds: HashMap<CatalogQuery, Vec<MovieStub>>,
    details: HashMap<MovieId, MovieDetail>,
    genres: Vec<Genre>,
    failure: Option<String>,
    page_requests: Vec<(CatalogQuery, u32)>,
}

#[derive(Debug, Clone)]
/// In-memory catalog serving fixed feeds split into pages. Clones share the same data.
pub struct MemoryCatalogService {
    page_size: usize,
    inner: Rc<RefCell<MemoryCatalogInner>>,
}

impl Default for MemoryCatalogService {
    fn default() -> Self {
        Self::new(20)
    }
}

impl MemoryCatalogService {
    /// Creates an empty catalog that pages feeds by `page_size` results.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            inner: Rc::new(RefCell::new(MemoryCatalogInner::default())),
        }
    }

    /// Replaces the full result list for a feed.
    pub fn set_feed(&self, query: CatalogQuery, movies: Vec<MovieStub>) {
        self.inner.borrow_mut().feeds.insert(query, movies);
    }

    /// Registers a detail record, keyed by its movie id.
    pub fn set_detail(&self, detail: MovieDetail) {
        self.inner
            .borrow_mut()
            .details
            .insert(detail.stub.id, detail);
    }

    /// Replaces the genre list.
    pub fn set_genres(&self, genres: Vec<Genre>) {
        self.inner.borrow_mut().genres = genres;
    }

    /// Makes every subsequent call fail with `message` until [`Self::recover`] is called.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.inner.borrow_mut().failure = Some(message.into());
    }

    /// Clears a failure installed by [`Self::fail_with`].
    pub fn recover(&self) {
        self.inner.borrow_mut().failure = None;
    }

    /// Returns every `(query, page)` list request received so far, in order.
    pub fn page_requests(&self) -> Vec<(CatalogQuery, u32)> {
        self.inner.borrow().page_requests.clone()
    }

    fn check_failure(&self) -> Result<(), FetchError> {
        match &self.inner.borrow().failure {
            Some(message) => Err(FetchError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn page_of(&self, query: &CatalogQuery, page: u32) -> CatalogPage {
        let inner = self.inner.borrow();
        let movies = inner.feeds.get(query).map(Vec::as_slice).unwrap_or_default();
        let total_pages = movies.len().div_ceil(self.page_size) as u32;
        let start = (page.max(1) as usize - 1) * self.page_size;
        let results = movies
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        CatalogPage::new(page, results, total_pages)
    }
}

impl CatalogService for MemoryCatalogService {
    fn fetch_page<'a>(
        &'a self,
        query: &'a CatalogQuery,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, FetchError>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .page_requests
                .push((query.clone(), page));
            self.check_failure()?;
            Ok(self.page_of(query, page))
        })
    }

    fn fetch_detail(&self, movie_id: MovieId) -> CatalogFuture<'_, Result<MovieDetail, FetchError>> {
        Box::pin(async move {
            self.check_failure()?;
            self.inner
                .borrow()
                .details
                .get(&movie_id)
                .cloned()
                .ok_or_else(|| FetchError::new(format!("movie {movie_id} not found")))
        })
    }

    fn fetch_genres(&self) -> CatalogFuture<'_, Result<Vec<Genre>, FetchError>> {
        Box::pin(async move {
            self.check_failure()?;
            Ok(self.inner.borrow().genres.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn movies(count: u64) -> Vec<MovieStub> {
        (1..=count)
            .map(|id| MovieStub::new(id, format!("Movie {id}")))
            .collect()
    }

    #[test]
    fn memory_catalog_splits_feed_into_pages() {
        let catalog = MemoryCatalogService::new(2);
        catalog.set_feed(CatalogQuery::Popular, movies(5));

        let page = block_on(catalog.fetch_page(&CatalogQuery::Popular, 3)).expect("page 3");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results, vec![MovieStub::new(5, "Movie 5")]);
        assert_eq!(
            catalog.page_requests(),
            vec![(CatalogQuery::Popular, 3)]
        );
    }

    #[test]
    fn unknown_feed_is_an_empty_page() {
        let catalog = MemoryCatalogService::default();
        let page = block_on(catalog.fetch_page(&CatalogQuery::Upcoming, 1)).expect("page");
        assert!(page.results.is_empty());
        assert_eq!(page.normalized_total_pages(), 1);
    }

    #[test]
    fn installed_failure_rejects_until_recovered() {
        let catalog = MemoryCatalogService::default();
        catalog.fail_with("offline");
        let err = block_on(catalog.fetch_page(&CatalogQuery::Popular, 1)).expect_err("fails");
        assert_eq!(err, FetchError::new("offline"));
        assert!(block_on(catalog.fetch_genres()).is_err());

        catalog.recover();
        assert!(block_on(catalog.fetch_genres()).is_ok());
    }

    #[test]
    fn detail_lookup_by_id() {
        let catalog = MemoryCatalogService::default();
        catalog.set_detail(MovieDetail {
            runtime: Some(120),
            genres: Vec::new(),
            tagline: None,
            stub: MovieStub::new(42, "Answer"),
        });
        let detail = block_on(catalog.fetch_detail(MovieId(42))).expect("detail");
        assert_eq!(detail.runtime, Some(120));
        assert!(block_on(catalog.fetch_detail(MovieId(7))).is_err());
        assert!(block_on(NoopCatalogService.fetch_detail(MovieId(42))).is_err());
    }
}
