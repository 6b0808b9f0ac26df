/// TMDB (The Movie Database) v3 provider
///
/// Endpoints used:
/// - Trending: /movie/popular
/// - Text search: /search/movie
/// - Filtered browse: /discover/movie
/// - Details: /movie/{id}
/// - Similar: /movie/{id}/recommendations
/// - Top rated: /movie/top_rated
///
/// Every request authenticates with the `api_key` query parameter and asks for page 1.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ApiPage, DiscoverQuery, Movie, MovieDetails, MovieId},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const FIRST_PAGE: &str = "1";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
        )
    }

    /// Issues a GET against `endpoint` and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, endpoint);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %endpoint, error = %e, "Catalog request failed");
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint = %endpoint,
                status = %status,
                body = %body,
                "Catalog API request failed"
            );
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetches the first page of a list endpoint
    async fn get_page(
        &self,
        endpoint: &str,
        mut params: Vec<(&str, String)>,
    ) -> AppResult<Vec<Movie>> {
        params.push(("page", FIRST_PAGE.to_string()));
        let page: ApiPage<Movie> = self.get_json(endpoint, &params).await?;

        tracing::info!(
            endpoint = %endpoint,
            results = page.results.len(),
            total_results = page.total_results,
            provider = "tmdb",
            "Catalog list fetched"
        );

        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_trending(&self) -> AppResult<Vec<Movie>> {
        self.get_page("/movie/popular", Vec::new()).await
    }

    async fn search_by_text(&self, query: &str) -> AppResult<Vec<Movie>> {
        self.get_page("/search/movie", vec![("query", query.to_string())])
            .await
    }

    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<Movie>> {
        self.get_page("/discover/movie", query.to_params()).await
    }

    async fn fetch_details(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let details: MovieDetails = self
            .get_json(&format!("/movie/{}", movie_id), &[])
            .await?;

        tracing::info!(
            movie_id = movie_id,
            title = %details.movie.title,
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details.normalized())
    }

    async fn fetch_similar(&self, movie_id: MovieId) -> AppResult<Vec<Movie>> {
        self.get_page(&format!("/movie/{}/recommendations", movie_id), Vec::new())
            .await
    }

    async fn fetch_top_rated(&self) -> AppResult<Vec<Movie>> {
        self.get_page("/movie/top_rated", Vec::new()).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
