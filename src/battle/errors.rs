use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A profile fetch failed; `source` keeps the gateway's error kind
    #[error("Failed to fetch player '{player}': {source}")]
    Fetch {
        player: String,
        #[source]
        source: GatewayError,
    },
}

impl BattleError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BattleError::Fetch {
                source: GatewayError::NotFound(_),
                ..
            }
        )
    }

    /// Identifier whose fetch caused the failure, if any
    pub fn player(&self) -> Option<&str> {
        match self {
            BattleError::Fetch { player, .. } => Some(player),
            BattleError::Validation(_) => None,
        }
    }
}
