use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{GenreId, Movie};

/// Sort orders understood by the discover endpoint
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortBy {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "vote_average.desc")]
    VoteAverageDesc,
    #[serde(rename = "release_date.desc")]
    ReleaseDateDesc,
    #[serde(rename = "release_date.asc")]
    ReleaseDateAsc,
    #[serde(rename = "title.asc")]
    TitleAsc,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::PopularityDesc,
        SortBy::VoteAverageDesc,
        SortBy::ReleaseDateDesc,
        SortBy::ReleaseDateAsc,
        SortBy::TitleAsc,
    ];

    /// Upstream `sort_by` parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "popularity.desc",
            SortBy::VoteAverageDesc => "vote_average.desc",
            SortBy::ReleaseDateDesc => "release_date.desc",
            SortBy::ReleaseDateAsc => "release_date.asc",
            SortBy::TitleAsc => "title.asc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "Most Popular",
            SortBy::VoteAverageDesc => "Highest Rated",
            SortBy::ReleaseDateDesc => "Newest",
            SortBy::ReleaseDateAsc => "Oldest",
            SortBy::TitleAsc => "A-Z",
        }
    }
}

impl Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filters applied alongside a search query
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub genre: Option<GenreId>,
    /// Four-digit release year
    #[serde(default)]
    pub year: Option<String>,
    /// Minimum average rating, inclusive
    #[serde(default)]
    pub min_rating: Option<u32>,
    #[serde(default)]
    pub sort_by: SortBy,
}

impl SearchFilters {
    pub fn with_genre(mut self, genre: GenreId) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: u32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Year filter, ignoring a blank selection
    pub fn year(&self) -> Option<&str> {
        self.year
            .as_deref()
            .map(str::trim)
            .filter(|y| !y.is_empty())
    }

    /// True when any filter differs from the defaults
    pub fn is_active(&self) -> bool {
        self.genre.is_some()
            || self.year().is_some()
            || self.min_rating.is_some()
            || self.sort_by != SortBy::default()
    }

    /// Whether `movie` passes the genre, year and rating filters.
    ///
    /// Sort order is not a predicate and is ignored here.
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(genre) = self.genre {
            if !movie.has_genre(genre) {
                return false;
            }
        }
        if let Some(year) = self.year() {
            if !movie.released_in(year) {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if movie.vote_average < f64::from(min_rating) {
                return false;
            }
        }
        true
    }
}

/// Parameters for one call to the discover endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverQuery {
    /// Sent as a comma-joined `with_genres`
    pub genres: Vec<GenreId>,
    pub year: Option<String>,
    pub min_rating: Option<u32>,
    pub min_vote_count: Option<u32>,
    pub sort_by: SortBy,
}

impl DiscoverQuery {
    /// Upstream query parameters, excluding credentials and paging
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("sort_by", self.sort_by.as_str().to_string())];

        if !self.genres.is_empty() {
            let genres = self
                .genres
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("with_genres", genres));
        }
        if let Some(year) = &self.year {
            params.push(("year", year.clone()));
        }
        if let Some(min_rating) = self.min_rating {
            params.push(("vote_average.gte", min_rating.to_string()));
        }
        if let Some(min_vote_count) = self.min_vote_count {
            params.push(("vote_count.gte", min_vote_count.to_string()));
        }

        params
    }
}

impl From<&SearchFilters> for DiscoverQuery {
    fn from(filters: &SearchFilters) -> Self {
        Self {
            genres: filters.genre.into_iter().collect(),
            year: filters.year().map(str::to_string),
            min_rating: filters.min_rating,
            min_vote_count: None,
            sort_by: filters.sort_by,
        }
    }
}
