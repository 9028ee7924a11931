use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{battle, popular, shared::AppState};

/// Builds the HTTP router over the battle and popular services
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "GitHub Battle" }))
        .route("/battle", get(battle::handlers::battle))
        .route("/popular/languages", get(popular::handlers::list_languages))
        .route("/popular/:language", get(popular::handlers::popular_repos))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
