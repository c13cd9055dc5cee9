pub mod elo;
pub mod types;

pub use elo::{
    K_FACTOR, MINIMUM_RATING, STARTING_RATING, apply_result, elo_change, expected_score,
    rank_multiplier,
};
pub use types::{RankContext, RatingUpdate};
