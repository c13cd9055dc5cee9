use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bracket::BracketSlot;

pub type PlayerId = i64;
pub type MatchId = i64;
pub type ChallengeId = i64;
pub type TournamentId = i64;

/// A registered league member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Fraction of played games won; 0.0 before the first game
    pub fn win_rate(&self) -> f64 {
        let games = self.games_played();
        if games == 0 {
            return 0.0;
        }
        self.wins as f64 / games as f64
    }
}

/// Lifecycle of a reported result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Confirmed,
    Declined,
}

/// One ledger entry: who beat whom, at which ratings, for how many points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub winner_rating_before: i32,
    pub loser_rating_before: i32,
    pub rating_change: i32,
    pub challenge_id: Option<ChallengeId>,
    pub tournament_id: Option<TournamentId>,
    pub recorded_by: PlayerId,
    pub status: MatchStatus,
    pub played_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.winner_id == player_id || self.loser_id == player_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Pending,
    Accepted,
    Declined,
    Completed,
    Cancelled,
}

/// A head-to-head invitation from one player to another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub challenger_id: PlayerId,
    pub challenged_id: PlayerId,
    pub status: ChallengeStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Draft,
    Open,
    InProgress,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TournamentStatus::Draft => "draft",
            TournamentStatus::Open => "open",
            TournamentStatus::InProgress => "in_progress",
            TournamentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player's entry in one tournament
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub player_id: PlayerId,
    pub seed: Option<u32>,
    pub eliminated: bool,
    pub joined_at: DateTime<Utc>,
}

/// A single-elimination event and its bracket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub description: Option<String>,
    pub status: TournamentStatus,
    pub max_players: usize,
    pub created_by: PlayerId,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub participants: Vec<Participant>,
    pub bracket: Vec<BracketSlot>,
}

impl Tournament {
    pub fn participant(&self, player_id: PlayerId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.player_id == player_id)
    }

    pub fn participant_mut(&mut self, player_id: PlayerId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.player_id == player_id)
    }

    pub fn is_entered(&self, player_id: PlayerId) -> bool {
        self.participant(player_id).is_some()
    }

    /// Highest round number in the bracket; 0 before the bracket exists
    pub fn rounds(&self) -> u32 {
        self.bracket.iter().map(|s| s.round).max().unwrap_or(0)
    }

    /// Winner of the final slot, once decided
    pub fn champion(&self) -> Option<PlayerId> {
        let final_round = self.rounds();
        self.bracket
            .iter()
            .find(|s| s.round == final_round && s.position == 1)
            .and_then(|s| s.winner)
    }
}
