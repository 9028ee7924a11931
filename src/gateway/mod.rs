pub mod github;
pub mod memory;
pub mod models;

pub use github::GithubGateway;
pub use memory::InMemoryGateway;
pub use models::{ActivityCounters, ProfileRecord, RepoRecord};

use async_trait::async_trait;
use thiserror::Error;

use crate::popular::CategoryKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Remote source of player profiles and ranked repository lists.
///
/// Both calls may be issued concurrently. Implementations must not share
/// mutable state between in-flight calls.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetches one player's profile, including summed repository stars.
    async fn fetch_profile(&self, player_id: &str) -> Result<ProfileRecord, GatewayError>;

    /// Fetches the raw repository list for a category. An empty list is a
    /// valid result.
    async fn fetch_category_items(
        &self,
        key: &CategoryKey,
    ) -> Result<Vec<RepoRecord>, GatewayError>;
}
