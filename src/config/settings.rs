use crate::rating;

#[derive(Debug, Clone)]
pub struct LeagueSettings {
    pub starting_rating: i32,
    pub default_max_players: usize,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            starting_rating: rating::STARTING_RATING,
            default_max_players: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub player_count: usize,
    pub casual_rounds: usize,
    pub seed: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            player_count: 8,
            casual_rounds: 3,
            seed: 7,
        }
    }
}

pub struct AppConfig {
    pub league: LeagueSettings,
    pub simulation: SimulationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            league: LeagueSettings::default(),
            simulation: SimulationSettings::default(),
        }
    }
}
