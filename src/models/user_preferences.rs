use serde::{Deserialize, Serialize};

use super::{GenreId, MovieId};

/// Maximum number of queries kept in the search history
pub const SEARCH_HISTORY_LIMIT: usize = 10;

/// The user's taste profile and saved lists
///
/// Every list keeps insertion order for display but behaves as a set, except
/// `search_history` which is most-recent-first and bounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Movies the user liked, disjoint from `disliked_movies`
    #[serde(default)]
    pub liked_movies: Vec<MovieId>,
    /// Movies the user disliked, disjoint from `liked_movies`
    #[serde(default)]
    pub disliked_movies: Vec<MovieId>,
    /// Union of the genres of every liked movie
    #[serde(default)]
    pub favorite_genres: Vec<GenreId>,
    /// Recent queries, most recent first
    #[serde(default)]
    pub search_history: Vec<String>,
    /// Movies saved for later
    #[serde(default)]
    pub watchlist: Vec<MovieId>,
}

impl UserPreferences {
    /// Creates empty user preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a like and folds the movie's genres into the favorites.
    pub fn like(&mut self, movie_id: MovieId, genre_ids: &[GenreId]) {
        if !self.liked_movies.contains(&movie_id) {
            self.liked_movies.push(movie_id);
        }
        for genre in genre_ids {
            if !self.favorite_genres.contains(genre) {
                self.favorite_genres.push(*genre);
            }
        }
        self.disliked_movies.retain(|id| *id != movie_id);
    }

    /// Records a dislike. Genres gathered by an earlier like are kept.
    pub fn dislike(&mut self, movie_id: MovieId) {
        if !self.disliked_movies.contains(&movie_id) {
            self.disliked_movies.push(movie_id);
        }
        self.liked_movies.retain(|id| *id != movie_id);
    }

    pub fn add_to_watchlist(&mut self, movie_id: MovieId) {
        if !self.watchlist.contains(&movie_id) {
            self.watchlist.push(movie_id);
        }
    }

    pub fn remove_from_watchlist(&mut self, movie_id: MovieId) {
        self.watchlist.retain(|id| *id != movie_id);
    }

    /// Adds or removes the movie from the watchlist, returning whether it is now saved
    pub fn toggle_watchlist(&mut self, movie_id: MovieId) -> bool {
        if self.is_in_watchlist(movie_id) {
            self.remove_from_watchlist(movie_id);
            false
        } else {
            self.add_to_watchlist(movie_id);
            true
        }
    }

    /// Moves `query` to the front of the history, dropping older duplicates
    pub fn record_search(&mut self, query: &str) {
        self.search_history.retain(|q| q != query);
        self.search_history.insert(0, query.to_string());
        self.search_history.truncate(SEARCH_HISTORY_LIMIT);
    }

    pub fn clear_search_history(&mut self) {
        self.search_history.clear();
    }

    pub fn is_liked(&self, movie_id: MovieId) -> bool {
        self.liked_movies.contains(&movie_id)
    }

    pub fn is_disliked(&self, movie_id: MovieId) -> bool {
        self.disliked_movies.contains(&movie_id)
    }

    pub fn is_in_watchlist(&self, movie_id: MovieId) -> bool {
        self.watchlist.contains(&movie_id)
    }

    /// Whether there is anything to personalize recommendations with
    pub fn has_preference_signal(&self) -> bool {
        !self.liked_movies.is_empty()
            || !self.favorite_genres.is_empty()
            || !self.search_history.is_empty()
    }
}
