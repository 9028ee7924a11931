use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::models::MatchResult;
use crate::shared::{AppError, AppState};

/// Query string of a battle request, named the way the front end links to it
#[derive(Debug, Deserialize)]
pub struct BattleQuery {
    #[serde(rename = "playerOne")]
    pub player_one: String,
    #[serde(rename = "playerTwo")]
    pub player_two: String,
}

/// HTTP handler for running a battle
///
/// GET /battle?playerOne=..&playerTwo=..
/// Returns the ranked pair, or an error naming the player that failed
#[instrument(name = "battle", skip(state))]
pub async fn battle(
    State(state): State<AppState>,
    Query(query): Query<BattleQuery>,
) -> Result<Json<MatchResult>, AppError> {
    let result = state
        .battle_service
        .compare(&query.player_one, &query.player_two)
        .await?;

    info!(winner = %result.winner.profile.login, tie = result.tie, "Battle served");

    Ok(Json(result))
}
