use serde::{Deserialize, Serialize};

/// Upstream-assigned movie identifier
pub type MovieId = u64;

/// Genre identifier as used by the catalog API
pub type GenreId = u64;

/// Summary record for a movie as returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// ISO date; upstream sends an empty string for unknown dates
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub video: bool,
}

impl Movie {
    /// Creates a bare movie record with the given id and title
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 0.0,
            vote_count: 0,
            genre_ids: Vec::new(),
            popularity: 0.0,
            original_language: String::new(),
            original_title: String::new(),
            adult: false,
            video: false,
        }
    }

    /// True when the release date begins with `year`.
    ///
    /// Missing and empty release dates never match.
    pub fn released_in(&self, year: &str) -> bool {
        self.release_date
            .as_deref()
            .is_some_and(|date| !date.is_empty() && date.starts_with(year))
    }

    /// Leading four characters of the release date, if present
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
    }

    pub fn has_genre(&self, genre: GenreId) -> bool {
        self.genre_ids.contains(&genre)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub name: String,
}

/// Full detail record for a single movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

impl MovieDetails {
    /// Fills `genre_ids` from the resolved genres.
    ///
    /// The detail endpoint reports `genres` only, while liking a movie needs ids.
    pub fn normalized(mut self) -> Self {
        if self.movie.genre_ids.is_empty() {
            self.movie.genre_ids = self.genres.iter().map(|g| g.id).collect();
        }
        self
    }

    pub fn id(&self) -> MovieId {
        self.movie.id
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserializes_list_entry() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "overview": "Set in the 22nd century...",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "vote_count": 24000,
            "genre_ids": [28, 878],
            "popularity": 80.5,
            "original_language": "en",
            "original_title": "The Matrix",
            "adult": false,
            "video": false
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert_eq!(movie.backdrop_path, None);
        assert_eq!(movie.release_year(), Some("1999"));
        assert!(movie.released_in("1999"));
        assert!(!movie.released_in("2003"));
    }

    #[test]
    fn test_movie_tolerates_missing_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "release_date": ""}"#).unwrap();
        assert_eq!(movie.title, "");
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.release_year(), None);
        assert!(!movie.released_in(""));
        assert!(!movie.released_in("1999"));
    }

    #[test]
    fn test_release_year_with_multibyte_date() {
        let movie: Movie =
            serde_json::from_str(r#"{"id": 1, "release_date": "199é-01-01"}"#).unwrap();
        assert_eq!(movie.release_year(), None);
        assert!(!movie.released_in("1999"));

        let movie: Movie = serde_json::from_str(r#"{"id": 2, "release_date": "199"}"#).unwrap();
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_details_normalizes_genre_ids() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "runtime": 136,
            "tagline": "Welcome to the Real World.",
            "production_companies": [{"id": 79, "name": "Village Roadshow Pictures", "logo_path": null}],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "spoken_languages": [{"iso_639_1": "en", "name": "English"}]
        }"#;

        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert!(details.movie.genre_ids.is_empty());

        let details = details.normalized();
        assert_eq!(details.id(), 603);
        assert_eq!(details.movie.genre_ids, vec![28, 878]);
        assert_eq!(details.genre_names(), vec!["Action", "Science Fiction"]);
        assert_eq!(details.runtime, Some(136));
    }
}
