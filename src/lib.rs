// Library crate for the GitHub battle service
// This file exposes the public API for the binary and integration tests

pub mod battle;
pub mod config;
pub mod gateway;
pub mod popular;
pub mod routes;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use battle::{BattleError, BattleService, MatchResult, ScoredPlayer, Scorer};
pub use gateway::{GatewayError, InMemoryGateway, ProfileRecord, RemoteGateway, RepoRecord};
pub use popular::{CacheEntry, CacheStatus, CategoryKey, InvalidCategory, PopularCache};
pub use shared::{AppError, AppState};
