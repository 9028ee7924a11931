use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument, warn, Instrument, Span};
use uuid::Uuid;

use super::models::{CacheEntry, CacheStatus, CategoryKey};
use crate::gateway::{RemoteGateway, RepoRecord};

/// Session-scoped cache of popular repositories, keyed by category.
///
/// A key that is loaded or loading is never fetched again for the lifetime
/// of the cache. Failures are stored on the entry and do not stick: the next
/// `ensure_loaded` for that key fetches again. There is no timeout, so a
/// fetch that never completes leaves its key loading for good.
///
/// Each fetch runs on its own task and stores its outcome even if the caller
/// that started it is dropped.
pub struct PopularCache {
    session_id: Uuid,
    gateway: Arc<dyn RemoteGateway>,
    entries: Arc<Mutex<HashMap<CategoryKey, CacheEntry>>>,
}

impl PopularCache {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, "Popular cache session started");
        Self {
            session_id,
            gateway,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current state of a key; unknown keys read as not requested
    pub fn read(&self, key: &CategoryKey) -> CacheEntry {
        self.entries()
            .get(key)
            .cloned()
            .unwrap_or_else(|| CacheEntry::not_requested(key.clone()))
    }

    pub fn is_pending(&self, key: &CategoryKey) -> bool {
        self.read(key).is_pending()
    }

    /// Keys that have been requested at least once
    pub fn keys(&self) -> Vec<CategoryKey> {
        self.entries().keys().cloned().collect()
    }

    /// Fetches and ranks a category unless it is already loaded or loading.
    ///
    /// Errors are recorded on the entry rather than returned.
    #[instrument(skip(self, key), fields(session_id = %self.session_id, category = %key))]
    pub async fn ensure_loaded(&self, key: &CategoryKey) {
        {
            let mut entries = self.entries();
            let status = entries
                .get(key)
                .map(|entry| entry.status())
                .unwrap_or(CacheStatus::NotRequested);

            if matches!(status, CacheStatus::Loaded | CacheStatus::Loading) {
                debug!(status = %status, "Category already requested, skipping fetch");
                return;
            }

            entries.insert(key.clone(), CacheEntry::loading(key.clone()));
        }

        debug!("Fetching popular repositories");

        let gateway = self.gateway.clone();
        let entries = self.entries.clone();
        let task_key = key.clone();
        let fetch = tokio::spawn(
            async move {
                let entry = match gateway.fetch_category_items(&task_key).await {
                    Ok(mut items) => {
                        rank_by_stars(&mut items);
                        info!(item_count = items.len(), "Category loaded");
                        CacheEntry::loaded(task_key.clone(), items)
                    }
                    Err(error) => {
                        warn!(error = %error, "Category fetch failed");
                        CacheEntry::failed(task_key.clone(), error.to_string())
                    }
                };
                lock(&entries).insert(task_key, entry);
            }
            .instrument(Span::current()),
        );

        if let Err(join_error) = fetch.await {
            // Only a panicking gateway or runtime shutdown gets here
            error!(error = %join_error, "Category fetch task did not finish");
            let mut entries = self.entries();
            if entries.get(key).map(|entry| entry.status()) == Some(CacheStatus::Loading) {
                entries.insert(
                    key.clone(),
                    CacheEntry::failed(key.clone(), join_error.to_string()),
                );
            }
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CategoryKey, CacheEntry>> {
        lock(&self.entries)
    }
}

fn lock(
    entries: &Mutex<HashMap<CategoryKey, CacheEntry>>,
) -> MutexGuard<'_, HashMap<CategoryKey, CacheEntry>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Drop for PopularCache {
    fn drop(&mut self) {
        debug!(session_id = %self.session_id, "Popular cache session ended");
    }
}

/// Most-starred first; ties keep the order the gateway returned them in
pub fn rank_by_stars(items: &mut [RepoRecord]) {
    items.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
}
