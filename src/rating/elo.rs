use crate::rating::types::{RankContext, RatingUpdate};

pub const K_FACTOR: f64 = 32.0;
pub const STARTING_RATING: i32 = 1200;
pub const MINIMUM_RATING: i32 = 100;

const RANK_SCALE: f64 = 0.5;
const RANK_MULTIPLIER_MIN: f64 = 0.5;
const RANK_MULTIPLIER_MAX: f64 = 1.5;

/// Probability that the first player beats the second, on the standard
/// logistic curve with a 400-point scale.
pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b as f64 - rating_a as f64) / 400.0))
}

/// Scale factor derived from ladder positions. Beating someone ranked
/// above you pulls the multiplier over 1, beating someone below pushes
/// it under 1. A ladder of one player (or none) stays at exactly 1.
pub fn rank_multiplier(winner_rank: usize, loser_rank: usize, total_players: usize) -> f64 {
    if total_players <= 1 {
        return 1.0;
    }
    let spread = (winner_rank as f64 - loser_rank as f64) / total_players as f64;
    (1.0 + spread * RANK_SCALE).clamp(RANK_MULTIPLIER_MIN, RANK_MULTIPLIER_MAX)
}

/// Points exchanged for a win, rounded to the nearest integer and never
/// below 1. With a rank context the exchange is scaled by position on
/// the ladder; without one it is the plain Elo delta.
pub fn elo_change(winner_rating: i32, loser_rating: i32, ranks: Option<RankContext>) -> i32 {
    let expected = expected_score(winner_rating, loser_rating);
    let multiplier = match ranks {
        Some(ctx) => rank_multiplier(ctx.winner_rank, ctx.loser_rank, ctx.total_players),
        None => 1.0,
    };
    let change = (K_FACTOR * multiplier * (1.0 - expected)).round() as i32;
    change.max(1)
}

/// New ratings after a win. The winner gains the full exchange; the
/// loser drops by the same amount but never below the rating floor.
pub fn apply_result(
    winner_rating: i32,
    loser_rating: i32,
    ranks: Option<RankContext>,
) -> RatingUpdate {
    let change = elo_change(winner_rating, loser_rating, ranks);
    RatingUpdate {
        new_winner_rating: winner_rating.saturating_add(change),
        new_loser_rating: loser_rating.saturating_sub(change).max(MINIMUM_RATING),
        change,
    }
}
