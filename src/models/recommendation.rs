use serde::{Deserialize, Serialize};

use super::Movie;

/// Strategy that produced a recommendation group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationAlgorithm {
    GenreMatching,
    CollaborativeFiltering,
    TrendingGenreBased,
    RatingBased,
}

impl RecommendationAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationAlgorithm::GenreMatching => "genre-matching",
            RecommendationAlgorithm::CollaborativeFiltering => "collaborative-filtering",
            RecommendationAlgorithm::TrendingGenreBased => "trending-genre-based",
            RecommendationAlgorithm::RatingBased => "rating-based",
        }
    }
}

/// A labeled list of recommended movies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationGroup {
    pub id: String,
    pub title: String,
    pub description: String,
    pub movies: Vec<Movie>,
    pub algorithm: RecommendationAlgorithm,
}

impl RecommendationGroup {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        movies: Vec<Movie>,
        algorithm: RecommendationAlgorithm,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            movies,
            algorithm,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
