use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    error::AppResult,
    models::{
        DiscoverQuery, MovieId, RecommendationAlgorithm, RecommendationGroup, SortBy,
        UserPreferences,
    },
    services::providers::CatalogProvider,
};

/// Maximum movies kept per recommendation group
pub const GROUP_SIZE: usize = 10;

/// Favorite genres used by the genre-matching strategy
const GENRE_MATCHING_GENRES: usize = 3;
/// Favorite genres used by the trending strategy
const TRENDING_GENRES: usize = 2;
/// Vote count below which highly rated titles are ignored for genre matching
const GENRE_MATCHING_MIN_VOTES: u32 = 100;

/// Generates personalized recommendation groups
///
/// Runs up to four strategies in a fixed order, one after another:
/// 1. Genre matching (needs favorite genres)
/// 2. Collaborative filtering from a randomly chosen liked movie (needs likes)
/// 3. Popular titles in favorite genres (needs favorite genres)
/// 4. Top rated titles (always)
///
/// A failing personalized strategy only drops its own group. A failing top-rated
/// call fails the whole request.
pub struct RecommendationAggregator {
    provider: Arc<dyn CatalogProvider>,
    rng: Mutex<StdRng>,
}

impl RecommendationAggregator {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self::with_rng(provider, StdRng::from_entropy())
    }

    /// Uses `rng` to choose the seed movie for collaborative filtering
    pub fn with_rng(provider: Arc<dyn CatalogProvider>, rng: StdRng) -> Self {
        Self {
            provider,
            rng: Mutex::new(rng),
        }
    }

    pub async fn recommend(&self, prefs: &UserPreferences) -> AppResult<Vec<RecommendationGroup>> {
        let mut groups = Vec::new();

        if let Some(group) = self.genre_matching(prefs).await {
            groups.push(group);
        }
        if let Some(group) = self.collaborative_filtering(prefs).await {
            groups.push(group);
        }
        if let Some(group) = self.trending_in_genres(prefs).await {
            groups.push(group);
        }
        groups.push(self.top_rated().await?);

        tracing::info!(
            groups = groups.len(),
            algorithms = ?groups.iter().map(|g| g.algorithm.as_str()).collect::<Vec<_>>(),
            "Recommendations assembled"
        );

        Ok(groups)
    }

    async fn genre_matching(&self, prefs: &UserPreferences) -> Option<RecommendationGroup> {
        if prefs.favorite_genres.is_empty() {
            return None;
        }

        let query = DiscoverQuery {
            genres: leading(&prefs.favorite_genres, GENRE_MATCHING_GENRES),
            min_vote_count: Some(GENRE_MATCHING_MIN_VOTES),
            sort_by: SortBy::VoteAverageDesc,
            ..Default::default()
        };

        let movies = skip_on_failure(
            RecommendationAlgorithm::GenreMatching,
            self.provider.discover(&query).await,
        )?;

        Some(RecommendationGroup::new(
            "genre-based",
            "Because you love these genres",
            "Highly rated movies from your favorite genres",
            truncated(movies),
            RecommendationAlgorithm::GenreMatching,
        ))
    }

    async fn collaborative_filtering(
        &self,
        prefs: &UserPreferences,
    ) -> Option<RecommendationGroup> {
        let seed = self.pick_seed(&prefs.liked_movies)?;
        tracing::debug!(seed, liked = prefs.liked_movies.len(), "Collaborative seed chosen");

        let movies = skip_on_failure(
            RecommendationAlgorithm::CollaborativeFiltering,
            self.provider.fetch_similar(seed).await,
        )?;

        Some(RecommendationGroup::new(
            "similar-to-liked",
            "Because you liked similar movies",
            "Picked from what fans of your liked movies enjoy",
            truncated(movies),
            RecommendationAlgorithm::CollaborativeFiltering,
        ))
    }

    async fn trending_in_genres(&self, prefs: &UserPreferences) -> Option<RecommendationGroup> {
        if prefs.favorite_genres.is_empty() {
            return None;
        }

        let query = DiscoverQuery {
            genres: leading(&prefs.favorite_genres, TRENDING_GENRES),
            sort_by: SortBy::PopularityDesc,
            ..Default::default()
        };

        let movies = skip_on_failure(
            RecommendationAlgorithm::TrendingGenreBased,
            self.provider.discover(&query).await,
        )?;

        Some(RecommendationGroup::new(
            "trending-in-genres",
            "Trending in your genres",
            "What is popular right now in the genres you like",
            truncated(movies),
            RecommendationAlgorithm::TrendingGenreBased,
        ))
    }

    async fn top_rated(&self) -> AppResult<RecommendationGroup> {
        let movies = self.provider.fetch_top_rated().await?;

        Ok(RecommendationGroup::new(
            "top-rated",
            "Top rated movies",
            "The highest rated movies of all time",
            truncated(movies),
            RecommendationAlgorithm::RatingBased,
        ))
    }

    /// Chooses one liked movie uniformly at random
    fn pick_seed(&self, liked: &[MovieId]) -> Option<MovieId> {
        if liked.is_empty() {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Some(liked[rng.gen_range(0..liked.len())])
    }
}

fn leading<T: Copy>(items: &[T], n: usize) -> Vec<T> {
    items.iter().take(n).copied().collect()
}

fn truncated<T>(mut movies: Vec<T>) -> Vec<T> {
    movies.truncate(GROUP_SIZE);
    movies
}

fn skip_on_failure<T>(algorithm: RecommendationAlgorithm, result: AppResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                algorithm = algorithm.as_str(),
                error = %e,
                "Recommendation strategy failed, skipping group"
            );
            None
        }
    }
}
