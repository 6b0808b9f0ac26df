use crate::{
    error::AppResult,
    models::{DiscoverQuery, Movie, SearchFilters},
    services::{preferences::PreferenceStore, providers::CatalogProvider},
};
use std::sync::Arc;

/// Resolves a query plus filters into one result list
///
/// Text search upstream ignores filters, so a non-empty query is filtered locally
/// after the fact; an empty query hands the filters to the discover endpoint.
#[derive(Clone)]
pub struct SearchEngine {
    provider: Arc<dyn CatalogProvider>,
    preferences: PreferenceStore,
}

impl SearchEngine {
    pub fn new(provider: Arc<dyn CatalogProvider>, preferences: PreferenceStore) -> Self {
        Self {
            provider,
            preferences,
        }
    }

    /// Records `query` in the search history and runs the search.
    ///
    /// The query is recorded even when empty; deciding whether to search at all
    /// is up to the caller. On the text-search path results keep upstream
    /// relevance order and `sort_by` is not applied.
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> AppResult<Vec<Movie>> {
        self.preferences.record_search_async(query).await;

        if query.is_empty() {
            let movies = self.provider.discover(&DiscoverQuery::from(filters)).await?;
            tracing::info!(
                results = movies.len(),
                sort_by = %filters.sort_by,
                "Discover search completed"
            );
            return Ok(movies);
        }

        let movies = self.provider.search_by_text(query).await?;
        let fetched = movies.len();
        let movies = apply_local_filters(movies, filters);

        tracing::info!(
            query = %query,
            fetched,
            results = movies.len(),
            "Text search completed"
        );

        Ok(movies)
    }
}

/// Keeps the movies matching the genre, year and rating filters, preserving order
pub fn apply_local_filters(movies: Vec<Movie>, filters: &SearchFilters) -> Vec<Movie> {
    if !filters.is_active() {
        return movies;
    }
    movies.into_iter().filter(|m| filters.matches(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Storage;
    use crate::error::AppError;
    use crate::models::SortBy;
    use crate::services::providers::MockCatalogProvider;

    fn movie(id: u64, genres: &[u64], date: &str, rating: f64) -> Movie {
        let mut movie = Movie::new(id, format!("Movie {id}"));
        movie.genre_ids = genres.to_vec();
        movie.release_date = Some(date.to_string());
        movie.vote_average = rating;
        movie
    }

    fn engine(provider: MockCatalogProvider) -> (SearchEngine, PreferenceStore) {
        let prefs = PreferenceStore::load(Storage::in_memory());
        (SearchEngine::new(Arc::new(provider), prefs.clone()), prefs)
    }

    #[tokio::test]
    async fn test_text_search_applies_year_filter() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_by_text()
            .withf(|q| q == "matrix")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    movie(603, &[28, 878], "1999-03-30", 8.2),
                    movie(604, &[28, 878], "2003-05-15", 7.0),
                    movie(605, &[28], "", 6.0),
                ])
            });
        provider.expect_discover().never();

        let (engine, prefs) = engine(provider);
        let filters = SearchFilters::default().with_year("1999");

        let results = engine.search("matrix", &filters).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|m| m.release_date.as_deref().unwrap().starts_with("1999")));
        assert_eq!(prefs.snapshot().search_history, vec!["matrix"]);
    }

    #[tokio::test]
    async fn test_text_search_filters_genre_and_rating_keeps_order() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_by_text().returning(|_| {
            Ok(vec![
                movie(1, &[28], "2010-01-01", 7.5),
                movie(2, &[35], "2010-01-01", 9.0),
                movie(3, &[28, 12], "2012-01-01", 8.0),
                movie(4, &[28], "2012-01-01", 6.5),
            ])
        });

        let (engine, _) = engine(provider);
        let filters = SearchFilters::default()
            .with_genre(28)
            .with_min_rating(7)
            .with_sort_by(SortBy::TitleAsc);

        let results = engine.search("heist", &filters).await.unwrap();
        let ids: Vec<u64> = results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_text_search_with_no_matches_is_empty() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_by_text()
            .returning(|_| Ok(vec![movie(1, &[35], "2001-01-01", 5.0)]));

        let (engine, _) = engine(provider);
        let filters = SearchFilters::default().with_genre(27);

        let results = engine.search("comedy", &filters).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_uses_discover_without_post_filter() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_by_text().never();
        provider
            .expect_discover()
            .withf(|q| {
                q.genres == vec![28]
                    && q.sort_by == SortBy::VoteAverageDesc
                    && q.year.is_none()
                    && q.min_rating.is_none()
            })
            .times(1)
            // Genre 35 would be dropped by a local post-filter
            .returning(|_| Ok(vec![movie(1, &[35], "1990-01-01", 4.0)]));

        let (engine, prefs) = engine(provider);
        let filters = SearchFilters::default()
            .with_genre(28)
            .with_sort_by(SortBy::VoteAverageDesc);

        let results = engine.search("", &filters).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(prefs.snapshot().search_history, vec![""]);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates_after_recording() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_by_text().returning(|_| {
            Err(AppError::Upstream {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let (engine, prefs) = engine(provider);
        let result = engine.search("alien", &SearchFilters::default()).await;

        assert!(result.unwrap_err().is_upstream());
        assert_eq!(prefs.snapshot().search_history, vec!["alien"]);
    }

    #[test]
    fn test_apply_local_filters_without_filters_is_identity() {
        let movies = vec![movie(1, &[], "", 0.0), movie(2, &[28], "1999-01-01", 9.0)];
        let filtered = apply_local_filters(movies.clone(), &SearchFilters::default());
        assert_eq!(filtered, movies);
    }
}
