use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Barrier, Notify};

use github_battle::{CategoryKey, GatewayError, ProfileRecord, RemoteGateway, RepoRecord};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Gateway whose category fetches park until the test releases them.
///
/// Never calling `release` models a fetch that never resolves.
pub struct GatedGateway {
    categories: HashMap<String, Result<Vec<RepoRecord>, GatewayError>>,
    started: Notify,
    release: Notify,
    category_calls: AtomicUsize,
}

#[allow(dead_code)]
impl GatedGateway {
    pub fn new() -> Self {
        Self {
            categories: HashMap::new(),
            started: Notify::new(),
            release: Notify::new(),
            category_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_category(mut self, key: &str, items: Vec<RepoRecord>) -> Self {
        self.categories.insert(key.to_string(), Ok(items));
        self
    }

    pub fn with_category_error(mut self, key: &str, error: GatewayError) -> Self {
        self.categories.insert(key.to_string(), Err(error));
        self
    }

    /// Waits until a category fetch has reached the gateway
    pub async fn wait_for_fetch(&self) {
        tokio::time::timeout(Duration::from_secs(5), self.started.notified())
            .await
            .expect("category fetch should have started");
    }

    /// Lets one parked fetch complete
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteGateway for GatedGateway {
    async fn fetch_profile(&self, player_id: &str) -> Result<ProfileRecord, GatewayError> {
        Err(GatewayError::NotFound(player_id.to_string()))
    }

    async fn fetch_category_items(
        &self,
        key: &CategoryKey,
    ) -> Result<Vec<RepoRecord>, GatewayError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;

        self.categories
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Gateway that only answers profile fetches once both players have asked,
/// and answers them after per-player delays.
///
/// A battle that fetched sequentially would never get past the barrier.
pub struct RendezvousGateway {
    profiles: HashMap<String, (ProfileRecord, Duration)>,
    barrier: Arc<Barrier>,
}

#[allow(dead_code)]
impl RendezvousGateway {
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
            barrier: Arc::new(Barrier::new(2)),
        }
    }

    pub fn with_profile(mut self, profile: ProfileRecord, delay: Duration) -> Self {
        self.profiles
            .insert(profile.login.clone(), (profile, delay));
        self
    }
}

#[async_trait]
impl RemoteGateway for RendezvousGateway {
    async fn fetch_profile(&self, player_id: &str) -> Result<ProfileRecord, GatewayError> {
        self.barrier.wait().await;

        match self.profiles.get(player_id) {
            Some((profile, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(profile.clone())
            }
            None => Err(GatewayError::NotFound(player_id.to_string())),
        }
    }

    async fn fetch_category_items(
        &self,
        _key: &CategoryKey,
    ) -> Result<Vec<RepoRecord>, GatewayError> {
        Ok(Vec::new())
    }
}
