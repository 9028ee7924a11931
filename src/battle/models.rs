use serde::{Deserialize, Serialize};
use std::fmt;

use super::BattleError;
use crate::gateway::ProfileRecord;

const MAX_PLAYER_ID_LEN: usize = 100;

/// Validated identifier of one side of a battle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Validates a caller-supplied identifier before anything is fetched.
    ///
    /// Surrounding whitespace is ignored. The remaining text must be 1 to 100
    /// characters drawn from ASCII letters, digits, `-`, `_` and `.`, and may
    /// not consist of dots alone (`..` would climb out of `/users/`).
    pub fn parse(raw: &str) -> Result<Self, BattleError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(BattleError::Validation(
                "player identifier must not be empty".to_string(),
            ));
        }

        if trimmed.len() > MAX_PLAYER_ID_LEN {
            return Err(BattleError::Validation(format!(
                "player identifier exceeds {} characters",
                MAX_PLAYER_ID_LEN
            )));
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(BattleError::Validation(format!(
                "player identifier '{}' contains invalid character '{}'",
                trimmed, bad
            )));
        }

        if trimmed.chars().all(|c| c == '.') {
            return Err(BattleError::Validation(format!(
                "player identifier '{}' is not a valid login",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetched profile paired with its computed score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredPlayer {
    pub profile: ProfileRecord,
    pub score: u64,
}

/// Outcome of a head-to-head comparison.
///
/// When `tie` is true both sides hold equal scores and `winner`/`loser` only
/// reflect the order the players were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: ScoredPlayer,
    pub loser: ScoredPlayer,
    pub tie: bool,
}
