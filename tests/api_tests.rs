use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reelwave::db::Storage;
use reelwave::handlers;
use reelwave::models::{RecommendationAlgorithm, SearchFilters};
use reelwave::services::providers::TmdbProvider;
use reelwave::AppState;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("reelwave-api-test-{}", Uuid::new_v4()))
}

fn create_test_state(server: &MockServer, dir: &Path) -> AppState {
    let provider = TmdbProvider::new("test-key".to_string(), server.uri(), "en-US".to_string());
    AppState::new(Arc::new(provider), Storage::file(dir))
}

fn page(results: serde_json::Value) -> serde_json::Value {
    json!({ "page": 1, "results": results, "total_pages": 1, "total_results": 1 })
}

#[tokio::test]
async fn test_trending_then_watchlist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            {"id": 550, "title": "Fight Club", "genre_ids": [18]},
            {"id": 680, "title": "Pulp Fiction", "genre_ids": [53, 80]}
        ]))))
        .mount(&server)
        .await;

    let dir = scratch_dir();
    let state = create_test_state(&server, &dir);

    handlers::fetch_trending(&state).await;
    assert_eq!(state.trending().await.len(), 2);
    assert!(!state.is_loading().await);

    handlers::toggle_watchlist(&state, 680);
    let watchlist = handlers::watchlist_movies(&state).await;
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].title, "Pulp Fiction");

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_text_search_with_year_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "matrix"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            {"id": 603, "title": "The Matrix", "release_date": "1999-03-30"},
            {"id": 604, "title": "The Matrix Reloaded", "release_date": "2003-05-15"},
            {"id": 9999, "title": "Matrix Untitled", "release_date": ""}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let dir = scratch_dir();
    let state = create_test_state(&server, &dir);

    let filters = SearchFilters::default().with_year("1999");
    handlers::search(&state, "matrix", filters.clone()).await;

    let results = state.search_results().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 603);
    assert_eq!(state.current_query().await, "matrix");
    assert_eq!(state.current_filters().await, filters);
    assert_eq!(state.preferences().search_history, vec!["matrix"]);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_recommendations_skip_failed_strategy() {
    let server = MockServer::start().await;

    // Genre matching fails upstream
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("sort_by", "vote_average.desc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("with_genres", "28,12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            {"id": 1, "title": "Trending Action"}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/5/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            {"id": 2, "title": "Similar"}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            {"id": 3, "title": "Top Rated"}
        ]))))
        .mount(&server)
        .await;

    let dir = scratch_dir();
    let state = create_test_state(&server, &dir);

    handlers::like_movie(&state, 5, &[28, 12]);
    handlers::get_recommendations(&state).await;

    let algorithms: Vec<_> = state
        .recommendations()
        .await
        .iter()
        .map(|g| g.algorithm)
        .collect();
    assert_eq!(
        algorithms,
        vec![
            RecommendationAlgorithm::CollaborativeFiltering,
            RecommendationAlgorithm::TrendingGenreBased,
            RecommendationAlgorithm::RatingBased,
        ]
    );
    assert_eq!(state.last_error().await, None);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_state_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/603"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 603,
            "title": "The Matrix",
            "genres": [{"id": 28, "name": "Action"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = scratch_dir();
    {
        let state = create_test_state(&server, &dir);
        let details = handlers::fetch_movie_details(&state, 603).await.unwrap();
        handlers::like_movie(&state, details.id(), &details.movie.genre_ids);
        handlers::add_to_watchlist(&state, 603);
        handlers::record_search(&state, "matrix");
    }

    let restarted = create_test_state(&server, &dir);
    let prefs = restarted.preferences();
    assert_eq!(prefs.liked_movies, vec![603]);
    assert_eq!(prefs.favorite_genres, vec![28]);
    assert_eq!(prefs.watchlist, vec![603]);
    assert_eq!(prefs.search_history, vec!["matrix"]);

    // Served from the persisted cache; the mock expects a single upstream hit
    let details = handlers::fetch_movie_details(&restarted, 603).await.unwrap();
    assert_eq!(details.movie.title, "The Matrix");

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_corrupted_preferences_reset_to_empty() {
    let server = MockServer::start().await;
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("preferences.json"), "{\"likedMovies\": [1]").unwrap();

    let state = create_test_state(&server, &dir);
    assert!(state.preferences().liked_movies.is_empty());

    // The store keeps working and overwrites the bad record
    handlers::like_movie(&state, 2, &[]);
    let restarted = create_test_state(&server, &dir);
    assert_eq!(restarted.preferences().liked_movies, vec![2]);

    std::fs::remove_dir_all(dir).ok();
}
