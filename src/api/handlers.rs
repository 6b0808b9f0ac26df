use std::collections::HashMap;

use tracing::Instrument;

use crate::error::AppError;
use crate::models::{GenreId, Movie, MovieDetails, MovieId, SearchFilters, UserPreferences};
use crate::telemetry::{operation_span, RequestId};

use super::AppState;

// Loading protocol

async fn begin_loading(state: &AppState) {
    let mut inner = state.inner.write().await;
    inner.is_loading = true;
    inner.error = None;
}

async fn fail_loading(state: &AppState, error: AppError) {
    tracing::error!(error = %error, "Request failed");
    let mut inner = state.inner.write().await;
    inner.error = Some(error.to_string());
    inner.is_loading = false;
}

// Catalog

/// Loads the trending list
pub async fn fetch_trending(state: &AppState) {
    let request_id = RequestId::generate();
    async {
        begin_loading(state).await;

        match state.provider.fetch_trending().await {
            Ok(movies) => {
                tracing::info!(results = movies.len(), "Trending movies loaded");
                let mut inner = state.inner.write().await;
                inner.trending = movies;
                inner.is_loading = false;
            }
            Err(e) => fail_loading(state, e).await,
        }
    }
    .instrument(operation_span("fetch_trending", &request_id))
    .await
}

/// Runs a search and makes its results, query and filters current
pub async fn search(state: &AppState, query: &str, filters: SearchFilters) {
    let request_id = RequestId::generate();
    async {
        begin_loading(state).await;

        match state.search_engine.search(query, &filters).await {
            Ok(movies) => {
                let mut inner = state.inner.write().await;
                inner.search_results = movies;
                inner.current_query = query.to_string();
                inner.current_filters = filters;
                inner.is_loading = false;
            }
            Err(e) => fail_loading(state, e).await,
        }
    }
    .instrument(operation_span("search", &request_id))
    .await
}

/// Returns the movie's detail record, or `None` if it cannot be fetched.
///
/// Failures here do not touch the shared error or loading state.
pub async fn fetch_movie_details(state: &AppState, movie_id: MovieId) -> Option<MovieDetails> {
    let request_id = RequestId::generate();
    async {
        match state.details.get_or_fetch(movie_id, state.provider.as_ref()).await {
            Ok(details) => Some(details),
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Movie details unavailable");
                None
            }
        }
    }
    .instrument(operation_span("fetch_movie_details", &request_id))
    .await
}

/// Rebuilds the recommendation groups from the current preferences
pub async fn get_recommendations(state: &AppState) {
    let request_id = RequestId::generate();
    async {
        begin_loading(state).await;
        let prefs = state.preferences.snapshot();

        match state.aggregator.recommend(&prefs).await {
            Ok(groups) => {
                let mut inner = state.inner.write().await;
                inner.recommendations = groups;
                inner.is_loading = false;
            }
            Err(e) => fail_loading(state, e).await,
        }
    }
    .instrument(operation_span("get_recommendations", &request_id))
    .await
}

/// Watchlisted movies among the loaded trending and search lists, in watchlist order
pub async fn watchlist_movies(state: &AppState) -> Vec<Movie> {
    let watchlist = state.preferences.snapshot().watchlist;
    let inner = state.inner.read().await;

    let mut loaded: HashMap<MovieId, &Movie> = HashMap::new();
    for movie in inner.trending.iter().chain(inner.search_results.iter()) {
        loaded.entry(movie.id).or_insert(movie);
    }

    watchlist
        .iter()
        .filter_map(|id| loaded.get(id).map(|movie| (*movie).clone()))
        .collect()
}

// Preferences

pub fn like_movie(state: &AppState, movie_id: MovieId, genre_ids: &[GenreId]) -> UserPreferences {
    state.preferences.like(movie_id, genre_ids)
}

pub fn dislike_movie(state: &AppState, movie_id: MovieId) -> UserPreferences {
    state.preferences.dislike(movie_id)
}

pub fn add_to_watchlist(state: &AppState, movie_id: MovieId) -> UserPreferences {
    state.preferences.add_to_watchlist(movie_id)
}

pub fn remove_from_watchlist(state: &AppState, movie_id: MovieId) -> UserPreferences {
    state.preferences.remove_from_watchlist(movie_id)
}

pub fn toggle_watchlist(state: &AppState, movie_id: MovieId) -> UserPreferences {
    state.preferences.toggle_watchlist(movie_id)
}

pub fn record_search(state: &AppState, query: &str) -> UserPreferences {
    state.preferences.record_search(query)
}

pub fn clear_search_history(state: &AppState) -> UserPreferences {
    state.preferences.clear_search_history()
}
