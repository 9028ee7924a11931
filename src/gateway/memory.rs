use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use super::{GatewayError, ProfileRecord, RemoteGateway, RepoRecord};
use crate::popular::CategoryKey;

/// In-memory implementation of RemoteGateway for development and testing
///
/// Profiles and category listings are registered up front. Unknown players
/// resolve to `NotFound`; unknown categories resolve to an empty listing.
/// Every call is counted so callers can check how often the remote side
/// would have been hit.
#[derive(Default)]
pub struct InMemoryGateway {
    profiles: Mutex<HashMap<String, ProfileRecord>>,
    categories: Mutex<HashMap<String, Result<Vec<RepoRecord>, GatewayError>>>,
    profile_calls: Mutex<HashMap<String, usize>>,
    category_calls: Mutex<HashMap<String, usize>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: ProfileRecord) -> Self {
        self.insert_profile(profile);
        self
    }

    pub fn with_category(self, key: &str, items: Vec<RepoRecord>) -> Self {
        self.set_category(key, Ok(items));
        self
    }

    pub fn with_category_error(self, key: &str, error: GatewayError) -> Self {
        self.set_category(key, Err(error));
        self
    }

    pub fn insert_profile(&self, profile: ProfileRecord) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.login.clone(), profile);
    }

    /// Replaces what a category resolves to on subsequent fetches
    pub fn set_category(&self, key: &str, result: Result<Vec<RepoRecord>, GatewayError>) {
        self.categories
            .lock()
            .unwrap()
            .insert(key.to_string(), result);
    }

    /// Number of profile fetches issued for a player
    pub fn profile_calls(&self, player_id: &str) -> usize {
        self.profile_calls
            .lock()
            .unwrap()
            .get(player_id)
            .copied()
            .unwrap_or_default()
    }

    /// Number of listing fetches issued for a category
    pub fn category_calls(&self, key: &str) -> usize {
        self.category_calls
            .lock()
            .unwrap()
            .get(key)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RemoteGateway for InMemoryGateway {
    async fn fetch_profile(&self, player_id: &str) -> Result<ProfileRecord, GatewayError> {
        *self
            .profile_calls
            .lock()
            .unwrap()
            .entry(player_id.to_string())
            .or_default() += 1;

        let profile = self.profiles.lock().unwrap().get(player_id).cloned();
        match profile {
            Some(profile) => {
                debug!(player_id = %player_id, "Profile found in memory");
                Ok(profile)
            }
            None => {
                debug!(player_id = %player_id, "Profile not found in memory");
                Err(GatewayError::NotFound(player_id.to_string()))
            }
        }
    }

    async fn fetch_category_items(
        &self,
        key: &CategoryKey,
    ) -> Result<Vec<RepoRecord>, GatewayError> {
        *self
            .category_calls
            .lock()
            .unwrap()
            .entry(key.as_str().to_string())
            .or_default() += 1;

        let result = self.categories.lock().unwrap().get(key.as_str()).cloned();
        result.unwrap_or_else(|| Ok(Vec::new()))
    }
}
