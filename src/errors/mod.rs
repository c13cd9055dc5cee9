use thiserror::Error;

use crate::domain::models::{ChallengeId, MatchId, PlayerId, TournamentId, TournamentStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LadderError {
    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("Player name already taken: {0}")]
    NameTaken(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Challenge not found: {0}")]
    ChallengeNotFound(ChallengeId),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("A player cannot play against themselves")]
    SelfPlay,

    #[error("Player {0} is not part of this match")]
    NotAParticipant(PlayerId),

    #[error("Match {0} is not awaiting confirmation")]
    MatchNotPending(MatchId),

    #[error("The reporter cannot settle their own match")]
    RecorderCannotSettle,

    #[error("Challenge {0} is not awaiting a response")]
    ChallengeNotPending(ChallengeId),

    #[error("Challenge {0} has not been accepted")]
    ChallengeNotAccepted(ChallengeId),

    #[error("Match players do not belong to challenge {0}")]
    ChallengeMismatch(ChallengeId),

    #[error("Only the challenger can do this")]
    NotTheChallenger,

    #[error("Only the challenged player can do this")]
    NotTheChallenged,

    #[error("Only the tournament organizer can do this")]
    NotTheOrganizer,

    #[error("Player {0} already entered this tournament")]
    AlreadyEntered(PlayerId),

    #[error("Player {0} has not entered this tournament")]
    NotEntered(PlayerId),

    #[error("Tournament is full ({capacity} players)")]
    TournamentFull { capacity: usize },

    #[error("Tournament must be {expected}, but it is {actual}")]
    WrongTournamentStatus {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    #[error("At least {0} players are required")]
    FieldTooSmall(usize),

    #[error("No bracket slot at round {round}, position {position}")]
    SlotNotFound { round: u32, position: u32 },

    #[error("Bracket slot at round {round}, position {position} is missing a player")]
    SlotNotReady { round: u32, position: u32 },

    #[error("Bracket slot at round {round}, position {position} already has a winner")]
    SlotAlreadyDecided { round: u32, position: u32 },
}

pub type Result<T> = std::result::Result<T, LadderError>;
