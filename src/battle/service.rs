use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{MatchResult, PlayerId, ScoredPlayer},
    ranking::rank,
    scoring::Scorer,
    BattleError,
};
use crate::gateway::{ProfileRecord, RemoteGateway};

/// Runs head-to-head comparisons between two players.
///
/// Each call to [`BattleService::compare`] fetches both profiles again;
/// results are never cached.
pub struct BattleService {
    gateway: Arc<dyn RemoteGateway>,
    scorer: Scorer,
}

impl BattleService {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            scorer: Scorer::default(),
        }
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Fetches both players concurrently, scores them and ranks the pair.
    ///
    /// The first fetch to fail decides the error, tagged with the identifier
    /// that caused it. The other fetch's outcome is dropped.
    #[instrument(skip(self))]
    pub async fn compare(
        &self,
        player_one: &str,
        player_two: &str,
    ) -> Result<MatchResult, BattleError> {
        let first = PlayerId::parse(player_one)?;
        let second = PlayerId::parse(player_two)?;

        info!(player_one = %first, player_two = %second, "Battle pending");

        let (first_profile, second_profile) =
            match futures::try_join!(self.fetch(&first), self.fetch(&second)) {
                Ok(profiles) => profiles,
                Err(error) => {
                    warn!(error = %error, "Battle failed");
                    return Err(error);
                }
            };

        let result = rank(self.score(first_profile), self.score(second_profile));

        info!(
            winner = %result.winner.profile.login,
            winner_score = result.winner.score,
            loser = %result.loser.profile.login,
            loser_score = result.loser.score,
            tie = result.tie,
            "Battle succeeded"
        );

        Ok(result)
    }

    async fn fetch(&self, player: &PlayerId) -> Result<ProfileRecord, BattleError> {
        self.gateway
            .fetch_profile(player.as_str())
            .await
            .map_err(|source| BattleError::Fetch {
                player: player.to_string(),
                source,
            })
    }

    fn score(&self, profile: ProfileRecord) -> ScoredPlayer {
        let score = self.scorer.compute_score(&profile);
        ScoredPlayer { profile, score }
    }
}
