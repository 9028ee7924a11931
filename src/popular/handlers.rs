use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::{CacheEntry, CategoryKey};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing the languages offered in navigation
///
/// GET /popular/languages
#[instrument(name = "list_languages")]
pub async fn list_languages() -> Json<Vec<CategoryKey>> {
    Json(CategoryKey::defaults())
}

/// HTTP handler for popular repositories of one language
///
/// GET /popular/:language
/// Loads the category if this session has not requested it yet, then returns
/// the cached entry. A failed fetch is reported inside the entry, not as an
/// HTTP error. Malformed language names are rejected with 400 before they
/// reach the cache.
#[instrument(name = "popular_repos", skip(state))]
pub async fn popular_repos(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> Result<Json<CacheEntry>, AppError> {
    let key = CategoryKey::parse(&language)?;
    state.popular_cache.ensure_loaded(&key).await;

    let entry = state.popular_cache.read(&key);
    info!(category = %key, status = %entry.status(), "Popular repositories served");

    Ok(Json(entry))
}
