pub mod league;
pub mod models;
pub mod standings;
pub mod tiers;

pub use league::League;
pub use models::*;
pub use standings::{StandingsEntry, rank_pair, standings};
pub use tiers::Tier;
