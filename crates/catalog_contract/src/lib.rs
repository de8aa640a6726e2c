//! Shared contract types between the catalog runtime and the remote movie catalog.
//!
//! The remote catalog is a read-only collaborator: it answers paged list queries and detail
//! lookups keyed by an opaque [`MovieId`]. This crate defines the records it returns, the
//! [`CatalogQuery`] feeds a list view can browse, and the object-safe [`CatalogService`] trait the
//! runtime consumes. Hosts provide the transport.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod images;
mod memory;

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use images::{
    backdrop_url, format_runtime, poster_url, BACKDROP_PLACEHOLDER_URL, DEFAULT_BACKDROP_SIZE,
    DEFAULT_POSTER_SIZE, IMAGE_BASE_URL, POSTER_PLACEHOLDER_URL,
};
pub use memory::{MemoryCatalogService, NoopCatalogService};

/// Stable identifier for a catalog movie.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movie record as returned by catalog list queries.
///
/// Only [`MovieStub::id`] carries meaning for the runtime. Every other field is kept exactly as
/// the catalog sent it, explicit `null`s included, so a stored snapshot serializes back out
/// unchanged. The accessors read the display fields the client renders and treat `null`, a
/// missing key, and a value of the wrong type alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieStub {
    /// Catalog identifier.
    pub id: MovieId,
    /// Remaining catalog fields, preserved verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MovieStub {
    /// Creates a stub carrying only an id and a title.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.into()));
        Self {
            id: MovieId(id),
            fields,
        }
    }

    /// Sets a catalog field, replacing any previous value.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Display title.
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// Short synopsis.
    pub fn overview(&self) -> Option<&str> {
        self.str_field("overview")
    }

    /// Poster image path relative to the image CDN.
    pub fn poster_path(&self) -> Option<&str> {
        self.str_field("poster_path")
    }

    /// Backdrop image path relative to the image CDN.
    pub fn backdrop_path(&self) -> Option<&str> {
        self.str_field("backdrop_path")
    }

    /// Release date as sent by the catalog (`YYYY-MM-DD`).
    pub fn release_date(&self) -> Option<&str> {
        self.str_field("release_date")
    }

    /// Average vote on a 0-10 scale.
    pub fn vote_average(&self) -> Option<f64> {
        self.fields.get("vote_average").and_then(Value::as_f64)
    }

    /// Genre ids attached to the movie; empty when absent or `null`.
    pub fn genre_ids(&self) -> Vec<u32> {
        self.fields
            .get("genre_ids")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_u64)
                    .filter_map(|id| u32::try_from(id).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the title or an empty string when the catalog omitted it.
    pub fn display_title(&self) -> &str {
        self.title().unwrap_or_default()
    }

    /// Returns the four-digit release year when the release date is present.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Genre record from the catalog genre list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Catalog genre id.
    pub id: u32,
    /// Display name.
    pub name: String,
}

/// Extended movie record returned by detail lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Runtime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    /// Expanded genre records.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub genres: Vec<Genre>,
    /// Marketing tagline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Fields shared with list results.
    #[serde(flatten)]
    pub stub: MovieStub,
}

impl MovieDetail {
    /// Returns the list-level record used when saving the movie into a membership set.
    pub fn to_stub(&self) -> MovieStub {
        self.stub.clone()
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Page number this response answers (1-indexed).
    #[serde(default = "first_page")]
    pub page: u32,
    /// Movies on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<MovieStub>,
    /// Total number of pages available for the query.
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl CatalogPage {
    /// Builds a page response.
    pub fn new(page: u32, results: Vec<MovieStub>, total_pages: u32) -> Self {
        Self {
            page,
            results,
            total_pages,
        }
    }

    /// Returns the total page count with the catalog's "zero pages" answer mapped to one page.
    pub fn normalized_total_pages(&self) -> u32 {
        self.total_pages.max(1)
    }
}

/// Time window for trending feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendingWindow {
    /// Trending over the last day.
    Day,
    /// Trending over the last week.
    #[default]
    Week,
}

impl TrendingWindow {
    /// Returns the catalog path token for the window.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// Paged list feeds offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogQuery {
    /// Popular movies.
    Popular,
    /// Highest rated movies.
    TopRated,
    /// Movies currently in theaters.
    NowPlaying,
    /// Upcoming releases.
    Upcoming,
    /// Trending movies for a time window.
    Trending {
        /// Window the trend is computed over.
        window: TrendingWindow,
    },
    /// Free-text title search.
    Search {
        /// Search text.
        query: String,
    },
    /// Movies tagged with a genre.
    Genre {
        /// Catalog genre id.
        genre_id: u32,
    },
    /// Movies similar to a given movie.
    Similar {
        /// Movie the results are related to.
        movie_id: MovieId,
    },
    /// Recommendations derived from a given movie.
    Recommendations {
        /// Movie the results are related to.
        movie_id: MovieId,
    },
}

impl CatalogQuery {
    /// Returns a heading suitable for a list surface showing this feed.
    pub fn label(&self) -> String {
        match self {
            Self::Popular => "Popular Movies".to_string(),
            Self::TopRated => "Top Rated Movies".to_string(),
            Self::NowPlaying => "Now Playing".to_string(),
            Self::Upcoming => "Upcoming Movies".to_string(),
            Self::Trending { .. } => "Trending".to_string(),
            Self::Search { query } => format!("Search Results for \"{query}\""),
            Self::Genre { .. } => "Movies by Genre".to_string(),
            Self::Similar { .. } => "Similar Movies".to_string(),
            Self::Recommendations { .. } => "Recommended".to_string(),
        }
    }

    /// Returns `true` for a search with nothing to search for.
    pub fn is_blank_search(&self) -> bool {
        matches!(self, Self::Search { query } if query.trim().is_empty())
    }
}

/// Failure reported by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    /// Human-readable cause.
    pub message: String,
}

impl FetchError {
    /// Creates a fetch error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Object-safe boxed future used by [`CatalogService`] methods.
pub type CatalogFuture<'a, T> = LocalBoxFuture<'a, T>;

/// Remote catalog collaborator consumed by the runtime.
///
/// Every call is a single attempt; failures surface as [`FetchError`] with no retry.
pub trait CatalogService {
    /// Fetches one page of a list feed.
    fn fetch_page<'a>(
        &'a self,
        query: &'a CatalogQuery,
        page: u32,
    ) -> CatalogFuture<'a, Result<CatalogPage, FetchError>>;

    /// Fetches the extended record for one movie.
    fn fetch_detail(&self, movie_id: MovieId) -> CatalogFuture<'_, Result<MovieDetail, FetchError>>;

    /// Fetches the catalog genre list.
    fn fetch_genres(&self) -> CatalogFuture<'_, Result<Vec<Genre>, FetchError>>;
}
