pub mod cache;
pub mod handlers;
pub mod models;

pub use cache::{rank_by_stars, PopularCache};
pub use models::{CacheEntry, CacheStatus, CategoryKey, InvalidCategory, DEFAULT_LANGUAGES};
