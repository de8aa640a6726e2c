//! Named membership sets ("favorites", "watch-later") over movie stubs.
//!
//! Each set is an insertion-ordered list unique by movie id. Every mutation is a full
//! read-modify-write of the stored list: two surfaces toggling the same set between each other's
//! read and write resolve as last-writer-wins.

use catalog_contract::{MovieId, MovieStub};
use platform_host::KeyValueStore;
use serde::{Deserialize, Serialize};

use crate::config::StorageKeys;
use crate::error::StorageError;
use crate::persistence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// The two user lists.
pub enum MembershipSet {
    /// Movies marked as favorite.
    Favorites,
    /// Movies saved to watch later.
    WatchLater,
}

impl MembershipSet {
    /// Both sets, in display order.
    pub const ALL: [Self; 2] = [Self::Favorites, Self::WatchLater];

    /// Returns a stable string token for the set.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::WatchLater => "watch-later",
        }
    }

    /// Returns the tooltip for a toggle showing `is_member`.
    pub const fn toggle_label(self, is_member: bool) -> &'static str {
        match (self, is_member) {
            (Self::Favorites, true) => "Remove from Favorites",
            (Self::Favorites, false) => "Add to Favorites",
            (Self::WatchLater, true) => "Remove from Watch Later",
            (Self::WatchLater, false) => "Add to Watch Later",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Membership of one movie across both sets.
pub struct MembershipFlags {
    /// Movie is in favorites.
    pub favorite: bool,
    /// Movie is in watch-later.
    pub watch_later: bool,
}

/// Membership-set operations over the injected store.
#[derive(Debug, Clone)]
pub struct MembershipStore<S> {
    store: S,
    favorites_key: String,
    watch_later_key: String,
}

impl<S: KeyValueStore> MembershipStore<S> {
    /// Creates a membership store writing to the configured set keys.
    pub fn new(store: S, keys: &StorageKeys) -> Self {
        Self {
            store,
            favorites_key: keys.favorites.clone(),
            watch_later_key: keys.watch_later.clone(),
        }
    }

    fn key(&self, set: MembershipSet) -> &str {
        match set {
            MembershipSet::Favorites => self.favorites_key.as_str(),
            MembershipSet::WatchLater => self.watch_later_key.as_str(),
        }
    }

    /// Returns the set in insertion order; empty when absent or unreadable.
    pub fn list(&self, set: MembershipSet) -> Vec<MovieStub> {
        persistence::read_or_default(&self.store, self.key(set))
    }

    /// Returns the number of movies in the set.
    pub fn len(&self, set: MembershipSet) -> usize {
        self.list(set).len()
    }

    /// Returns `true` when the set holds a stub with `movie_id`.
    pub fn contains(&self, set: MembershipSet, movie_id: MovieId) -> bool {
        self.list(set).iter().any(|stub| stub.id == movie_id)
    }

    /// Returns membership of `movie_id` in both sets.
    pub fn membership(&self, movie_id: MovieId) -> MembershipFlags {
        MembershipFlags {
            favorite: self.contains(MembershipSet::Favorites, movie_id),
            watch_later: self.contains(MembershipSet::WatchLater, movie_id),
        }
    }

    /// Flips membership of `movie` and returns the new state.
    ///
    /// A present movie is removed; an absent one is appended as given, so the stored stub is the
    /// snapshot taken at insertion time.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the updated list cannot be written; the stored list is then
    /// unchanged.
    pub fn toggle(&self, set: MembershipSet, movie: &MovieStub) -> Result<bool, StorageError> {
        let mut stubs = self.list(set);
        let before = stubs.len();
        stubs.retain(|stub| stub.id != movie.id);
        let now_member = stubs.len() == before;
        if now_member {
            stubs.push(movie.clone());
        }
        persistence::write(&self.store, self.key(set), &stubs)?;
        Ok(now_member)
    }
}
