use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    cached,
    db::{RecordWriter, Storage, StorageKey},
    error::AppResult,
    models::{MovieDetails, MovieId},
    services::providers::CatalogProvider,
};

/// Write-once cache of movie detail records, persisted as `movie_details`
///
/// An entry is never refreshed once stored.
#[derive(Clone)]
pub struct DetailsCache {
    entries: Arc<Mutex<HashMap<MovieId, MovieDetails>>>,
    writer: RecordWriter,
}

impl DetailsCache {
    pub fn load(storage: Storage) -> Self {
        let loaded = storage.load::<HashMap<MovieId, MovieDetails>>(&StorageKey::MovieDetails);
        let entries = match loaded {
            Ok(Some(entries)) => {
                tracing::info!(entries = entries.len(), "Movie details cache loaded");
                entries
            }
            Ok(None) => HashMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read movie details cache, starting empty");
                HashMap::new()
            }
        };

        Self {
            entries: Arc::new(Mutex::new(entries)),
            writer: RecordWriter::new(storage, StorageKey::MovieDetails),
        }
    }

    /// Returns the cached record, fetching and storing it on first request
    pub async fn get_or_fetch(
        &self,
        movie_id: MovieId,
        provider: &dyn CatalogProvider,
    ) -> AppResult<MovieDetails> {
        cached!(self, movie_id, provider.fetch_details(movie_id))
    }

    pub fn get_cached(&self, movie_id: &MovieId) -> Option<MovieDetails> {
        let hit = self.lock().get(movie_id).cloned();
        tracing::debug!(movie_id = *movie_id, hit = hit.is_some(), "Details cache lookup");
        hit
    }

    /// Inserts `details` unless the movie is already cached, then persists the
    /// map off the async runtime
    pub async fn store(&self, movie_id: MovieId, details: &MovieDetails) {
        self.lock()
            .entry(movie_id)
            .or_insert_with(|| details.clone());

        let entries = self.entries.clone();
        let snapshot = move || entries.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Err(e) = self.writer.write_with_async(snapshot).await {
            tracing::warn!(error = %e, "Failed to persist movie details cache");
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<MovieId, MovieDetails>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
