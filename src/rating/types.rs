use serde::{Deserialize, Serialize};

/// Ladder positions of both players at the moment a result is applied.
/// Ranks count from 1 at the top of the standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankContext {
    pub winner_rank: usize,
    pub loser_rank: usize,
    pub total_players: usize,
}

/// Outcome of applying one result to a pair of ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub new_winner_rating: i32,
    pub new_loser_rating: i32,
    pub change: i32,
}
