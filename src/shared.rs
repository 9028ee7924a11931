use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::battle::{BattleError, BattleService, Scorer};
use crate::gateway::{GatewayError, RemoteGateway};
use crate::popular::{InvalidCategory, PopularCache};

/// Shared application state containing all dependencies
///
/// The popular cache lives as long as the state does, so one server process
/// is one caching session.
#[derive(Clone)]
pub struct AppState {
    pub battle_service: Arc<BattleService>,
    pub popular_cache: Arc<PopularCache>,
}

impl AppState {
    pub fn new(battle_service: Arc<BattleService>, popular_cache: Arc<PopularCache>) -> Self {
        Self {
            battle_service,
            popular_cache,
        }
    }

    /// Wires both services to the same gateway
    pub fn from_gateway(gateway: Arc<dyn RemoteGateway>, scorer: Scorer) -> Self {
        Self::new(
            Arc::new(BattleService::new(gateway.clone()).with_scorer(scorer)),
            Arc::new(PopularCache::new(gateway)),
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<BattleError> for AppError {
    fn from(error: BattleError) -> Self {
        let message = error.to_string();
        match error {
            BattleError::Validation(_) => AppError::BadRequest(message),
            BattleError::Fetch {
                source: GatewayError::NotFound(_),
                ..
            } => AppError::NotFound(message),
            BattleError::Fetch {
                source: GatewayError::Transport(_),
                ..
            } => AppError::Upstream(message),
        }
    }
}

impl From<InvalidCategory> for AppError {
    fn from(error: InvalidCategory) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_errors_map_to_status_codes() {
        let cases = [
            (
                BattleError::Validation("empty".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                BattleError::Fetch {
                    player: "ghost".to_string(),
                    source: GatewayError::NotFound("ghost".to_string()),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                BattleError::Fetch {
                    player: "bob".to_string(),
                    source: GatewayError::Transport("reset".to_string()),
                },
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
