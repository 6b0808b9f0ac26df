use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{self, Config};
use crate::db::Storage;
use crate::models::{self, Movie, RecommendationGroup, SearchFilters, UserPreferences};
use crate::services::{
    details::DetailsCache,
    preferences::PreferenceStore,
    providers::{CatalogProvider, TmdbProvider},
    recommendations::RecommendationAggregator,
    search::SearchEngine,
};

/// State shared with the presentation layer
///
/// Cloning is cheap; every clone sees the same lists, preferences and caches.
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<RwLock<AppStateInner>>,
    pub(crate) provider: Arc<dyn CatalogProvider>,
    pub(crate) preferences: PreferenceStore,
    pub(crate) details: DetailsCache,
    pub(crate) search_engine: SearchEngine,
    pub(crate) aggregator: Arc<RecommendationAggregator>,
    image_base_url: String,
}

/// View state written by the entry points
#[derive(Debug, Default)]
pub(crate) struct AppStateInner {
    pub trending: Vec<Movie>,
    pub search_results: Vec<Movie>,
    pub current_query: String,
    pub current_filters: SearchFilters,
    pub recommendations: Vec<RecommendationGroup>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AppState {
    /// Creates state backed by `provider`, rehydrating persisted records from `storage`
    pub fn new(provider: Arc<dyn CatalogProvider>, storage: Storage) -> Self {
        let aggregator = RecommendationAggregator::new(provider.clone());
        Self::with_aggregator(provider, storage, aggregator)
    }

    /// Same as [`AppState::new`] with a caller-supplied aggregator
    pub fn with_aggregator(
        provider: Arc<dyn CatalogProvider>,
        storage: Storage,
        aggregator: RecommendationAggregator,
    ) -> Self {
        let preferences = PreferenceStore::load(storage.clone());
        let details = DetailsCache::load(storage);
        let search_engine = SearchEngine::new(provider.clone(), preferences.clone());

        tracing::info!(
            provider = provider.name(),
            cached_details = details.len(),
            "Application state initialized"
        );

        Self {
            inner: Arc::new(RwLock::new(AppStateInner::default())),
            provider,
            preferences,
            details,
            search_engine,
            aggregator: Arc::new(aggregator),
            image_base_url: config::default_tmdb_image_base_url(),
        }
    }

    /// TMDB-backed state persisting to the configured data directory
    pub fn from_config(config: &Config) -> Self {
        let provider = Arc::new(TmdbProvider::from_config(config));
        let storage = Storage::file(config.data_dir());
        Self::new(provider, storage).with_image_base_url(config.tmdb_image_base_url.clone())
    }

    pub fn with_image_base_url(mut self, image_base_url: String) -> Self {
        self.image_base_url = image_base_url;
        self
    }

    /// Full URL for a poster or backdrop path, or the placeholder image
    pub fn image_url(&self, path: Option<&str>) -> String {
        models::image_url(&self.image_base_url, path)
    }

    pub async fn trending(&self) -> Vec<Movie> {
        self.inner.read().await.trending.clone()
    }

    pub async fn search_results(&self) -> Vec<Movie> {
        self.inner.read().await.search_results.clone()
    }

    pub async fn current_query(&self) -> String {
        self.inner.read().await.current_query.clone()
    }

    pub async fn current_filters(&self) -> SearchFilters {
        self.inner.read().await.current_filters.clone()
    }

    pub async fn recommendations(&self) -> Vec<RecommendationGroup> {
        self.inner.read().await.recommendations.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.is_loading
    }

    pub async fn last_error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    pub fn preferences(&self) -> UserPreferences {
        self.preferences.snapshot()
    }
}
