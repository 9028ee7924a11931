use super::models::{MatchResult, ScoredPlayer};

/// Orders two scored players by score, highest first.
///
/// Equal scores produce `tie = true` with the input order kept as
/// `(winner = first, loser = second)`; in that case the labels are positional
/// and say nothing about either player.
pub fn rank(first: ScoredPlayer, second: ScoredPlayer) -> MatchResult {
    if second.score > first.score {
        MatchResult {
            winner: second,
            loser: first,
            tie: false,
        }
    } else {
        let tie = first.score == second.score;
        MatchResult {
            winner: first,
            loser: second,
            tie,
        }
    }
}
