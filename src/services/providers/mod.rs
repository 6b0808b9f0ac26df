/// Movie catalog provider abstraction
///
/// Every piece of content shown to the user comes from a catalog provider. The
/// trait keeps the search engine and the recommendation aggregator independent of
/// the concrete HTTP client so they can be exercised against mocks.
use crate::{
    error::AppResult,
    models::{DiscoverQuery, Movie, MovieDetails, MovieId},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie catalog providers
///
/// List operations return only the first page of upstream results. Any failure
/// is an upstream error; providers never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Globally popular titles
    async fn fetch_trending(&self) -> AppResult<Vec<Movie>>;

    /// Free-text title search
    ///
    /// Upstream ranks results by relevance and accepts no filters.
    async fn search_by_text(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Filtered browse
    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<Movie>>;

    /// Full record for a single title
    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<MovieDetails>;

    /// Titles recommended to people who liked `movie_id`
    async fn fetch_similar(&self, movie_id: MovieId) -> AppResult<Vec<Movie>>;

    /// All-time highest-rated titles
    async fn fetch_top_rated(&self) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
