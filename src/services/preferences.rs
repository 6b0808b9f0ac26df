use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    db::{RecordWriter, Storage, StorageKey},
    models::{GenreId, MovieId, UserPreferences},
};

/// Owner of the user's preferences
///
/// Every mutation applies to the in-memory copy, persists the `preferences`
/// record and returns the updated snapshot. Mutations never fail: a record that
/// cannot be written is logged and the in-memory state stays authoritative.
#[derive(Clone)]
pub struct PreferenceStore {
    prefs: Arc<Mutex<UserPreferences>>,
    writer: RecordWriter,
}

impl PreferenceStore {
    /// Rehydrates preferences from storage, starting empty if nothing usable is found
    pub fn load(storage: Storage) -> Self {
        let prefs = match storage.load::<UserPreferences>(&StorageKey::Preferences) {
            Ok(Some(prefs)) => {
                tracing::info!(
                    liked = prefs.liked_movies.len(),
                    watchlist = prefs.watchlist.len(),
                    history = prefs.search_history.len(),
                    "Preferences loaded"
                );
                prefs
            }
            Ok(None) => UserPreferences::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read preferences, starting empty");
                UserPreferences::new()
            }
        };

        Self {
            prefs: Arc::new(Mutex::new(prefs)),
            writer: RecordWriter::new(storage, StorageKey::Preferences),
        }
    }

    /// Current preferences
    pub fn snapshot(&self) -> UserPreferences {
        self.lock().clone()
    }

    pub fn like(&self, movie_id: MovieId, genre_ids: &[GenreId]) -> UserPreferences {
        tracing::debug!(movie_id, genres = ?genre_ids, "Liking movie");
        self.update(|prefs| prefs.like(movie_id, genre_ids))
    }

    pub fn dislike(&self, movie_id: MovieId) -> UserPreferences {
        tracing::debug!(movie_id, "Disliking movie");
        self.update(|prefs| prefs.dislike(movie_id))
    }

    pub fn add_to_watchlist(&self, movie_id: MovieId) -> UserPreferences {
        self.update(|prefs| prefs.add_to_watchlist(movie_id))
    }

    pub fn remove_from_watchlist(&self, movie_id: MovieId) -> UserPreferences {
        self.update(|prefs| prefs.remove_from_watchlist(movie_id))
    }

    pub fn toggle_watchlist(&self, movie_id: MovieId) -> UserPreferences {
        self.update(|prefs| {
            prefs.toggle_watchlist(movie_id);
        })
    }

    pub fn record_search(&self, query: &str) -> UserPreferences {
        self.update(|prefs| prefs.record_search(query))
    }

    /// [`PreferenceStore::record_search`] for async callers; the write runs on
    /// the blocking pool
    pub async fn record_search_async(&self, query: &str) -> UserPreferences {
        let prefs = self.mutate(|prefs| prefs.record_search(query));

        let shared = self.prefs.clone();
        let snapshot = move || shared.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Err(e) = self.writer.write_with_async(snapshot).await {
            tracing::warn!(error = %e, "Failed to persist preferences");
        }

        prefs
    }

    pub fn clear_search_history(&self) -> UserPreferences {
        tracing::info!("Clearing search history");
        self.update(|prefs| prefs.clear_search_history())
    }

    fn update(&self, mutate: impl FnOnce(&mut UserPreferences)) -> UserPreferences {
        let prefs = self.mutate(mutate);

        if let Err(e) = self.writer.write_with(|| self.snapshot()) {
            tracing::warn!(error = %e, "Failed to persist preferences");
        }

        prefs
    }

    fn mutate(&self, mutate: impl FnOnce(&mut UserPreferences)) -> UserPreferences {
        let mut prefs = self.lock();
        mutate(&mut prefs);
        prefs.clone()
    }

    fn lock(&self) -> MutexGuard<'_, UserPreferences> {
        self.prefs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
