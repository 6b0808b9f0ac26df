use serde::Deserialize;

mod movie;
mod recommendation;
mod search;
mod user_preferences;

pub use movie::{
    Genre, GenreId, Movie, MovieDetails, MovieId, ProductionCompany, ProductionCountry,
    SpokenLanguage,
};
pub use recommendation::{RecommendationAlgorithm, RecommendationGroup};
pub use search::{DiscoverQuery, SearchFilters, SortBy};
pub use user_preferences::{UserPreferences, SEARCH_HISTORY_LIMIT};

/// Image shown when a movie has no poster or backdrop
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Rating thresholds offered as search filters
pub const RATING_THRESHOLDS: [u32; 3] = [7, 8, 9];

/// Genres offered as search filters
pub const GENRES: [(GenreId, &str); 10] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (18, "Drama"),
    (27, "Horror"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (53, "Thriller"),
];

pub fn genre_name(id: GenreId) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Resolves a poster or backdrop path against the image base URL
pub fn image_url(base_url: &str, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{}{}", base_url.trim_end_matches('/'), path),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// One page of a TMDB list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_name_lookup() {
        assert_eq!(genre_name(28), Some("Action"));
        assert_eq!(genre_name(10749), Some("Romance"));
        assert_eq!(genre_name(1), None);
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/w500", Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/w500/", Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(image_url("https://image.tmdb.org/t/p/w500", None), PLACEHOLDER_IMAGE);
        assert_eq!(image_url("https://image.tmdb.org/t/p/w500", Some("")), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_api_page_deserializes() {
        let json = r#"{
            "page": 1,
            "results": [{"id": 550, "title": "Fight Club", "genre_ids": [18]}],
            "total_pages": 500,
            "total_results": 10000
        }"#;

        let page: ApiPage<Movie> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "Fight Club");
    }
}
